//! Prediction output records.
//!
//! A `PredictionResult` is created exactly once per accepted request and is
//! never mutated afterwards. The serialized form is the durable history
//! format, so field names are camelCase and stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Advisory drilling window attached to every result.
pub const BEST_DRILLING_TIME: &str = "Early monsoon season (June-July)";

/// Chart labels, in breakdown order.
pub const CHART_LABELS: [&str; 4] = [
    "Soil Quality",
    "Rock Formation",
    "Depth Factor",
    "Overall Score",
];

static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Time-derived prediction identifier (epoch milliseconds).
///
/// Generation is strictly increasing within a process, so two results
/// created in the same millisecond still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionId(pub u64);

impl PredictionId {
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    pub fn generate_at(now: DateTime<Utc>) -> Self {
        let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let previous = LAST_ID
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_ms.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        Self(now_ms.max(previous + 1))
    }

    /// Make later ids sort after `id`, e.g. ids loaded from stored history.
    pub fn observe(id: PredictionId) {
        LAST_ID.fetch_max(id.0, Ordering::SeqCst);
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PredictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drilling recommendation, selected by confidence bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Recommendation {
    Excellent,
    Good,
    Poor,
}

impl Recommendation {
    /// Brackets use strict comparisons: 70 is `Good`, 50 is `Poor`.
    pub fn for_confidence(confidence: u8) -> Self {
        if confidence > 70 {
            Self::Excellent
        } else if confidence > 50 {
            Self::Good
        } else {
            Self::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent location for drilling",
            Self::Good => "Good potential, proceed with caution",
            Self::Poor => "Poor location, consider alternative sites",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Recommendation> for String {
    fn from(value: Recommendation) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<String> for Recommendation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        [Self::Excellent, Self::Good, Self::Poor]
            .into_iter()
            .find(|r| r.as_str() == value)
            .ok_or_else(|| format!("unknown recommendation: {value}"))
    }
}

/// Coordinates echoed from the request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// One bar of the score breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(alias = "name")]
    pub label: String,
    pub value: u32,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: u32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Full output record of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub id: PredictionId,
    /// Percent, 0..=100.
    pub confidence: u8,
    /// Meters.
    pub water_level: u32,
    pub estimated_yield: u32,
    pub recommendation: Recommendation,
    pub best_time: String,
    pub location: Location,
    pub timestamp: DateTime<Utc>,
    pub chart_data: Vec<ChartPoint>,
}

impl PredictionResult {
    /// Chart value for a breakdown label, if present.
    pub fn chart_value(&self, label: &str) -> Option<u32> {
        self.chart_data
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.value)
    }
}
