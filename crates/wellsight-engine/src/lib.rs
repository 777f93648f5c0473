//! Wellsight Engine - groundwater suitability scoring.
//!
//! The engine maps a validated [`PredictionRequest`] to a
//! [`PredictionResult`] with three lookup-table factors:
//!
//! - **soil quality**: clay 0.8, sandy 0.4, loamy 0.7, rocky 0.3
//! - **rock formation**: sedimentary 0.9, igneous 0.5, metamorphic 0.6
//! - **depth**: 0.8 above 50 m, 0.6 above 30 m, otherwise 0.4
//!
//! Unrecognized categories score [`DEFAULT_FACTOR`]. Confidence is the mean of
//! the three factors as a rounded percentage. Apart from `id` and `timestamp`
//! the output is a pure function of the request.
//!
//! [`score`] is total. The [`Scorer`] trait is the seam the lifecycle
//! controller calls through, and it is fallible so that a future scoring
//! backend can report [`EngineError`]s.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod scorer;

pub use scorer::{EngineError, MockScorer, Scorer};

use chrono::{DateTime, Utc};
use tracing::debug;
use wellsight_types::{
    ChartPoint, Location, PredictionId, PredictionRequest, PredictionResult, Recommendation,
    RockType, SoilType, BEST_DRILLING_TIME, CHART_LABELS,
};

/// Factor used for any category missing from the lookup tables.
pub const DEFAULT_FACTOR: f64 = 0.5;

/// Converts water level (m) into an estimated yield.
pub const YIELD_MULTIPLIER: f64 = 1.5;

/// Share of the drilled depth expected to hold water at full confidence.
pub const WATER_LEVEL_RATIO: f64 = 0.8;

/// The three factors behind one confidence value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub soil: f64,
    pub rock: f64,
    pub depth: f64,
}

impl ScoreBreakdown {
    pub fn for_request(request: &PredictionRequest) -> Self {
        Self {
            soil: soil_factor(request.soil_type()),
            rock: rock_factor(request.rock_type()),
            depth: depth_factor(request.depth()),
        }
    }

    /// Mean of the factors as a rounded percentage.
    pub fn confidence(&self) -> u8 {
        let mean = (self.soil + self.rock + self.depth) / 3.0;
        percent(mean).min(100) as u8
    }
}

pub fn soil_factor(soil: &SoilType) -> f64 {
    match soil {
        SoilType::Clay => 0.8,
        SoilType::Sandy => 0.4,
        SoilType::Loamy => 0.7,
        SoilType::Rocky => 0.3,
        SoilType::Other(_) => DEFAULT_FACTOR,
    }
}

pub fn rock_factor(rock: &RockType) -> f64 {
    match rock {
        RockType::Sedimentary => 0.9,
        RockType::Igneous => 0.5,
        RockType::Metamorphic => 0.6,
        RockType::Other(_) => DEFAULT_FACTOR,
    }
}

pub fn depth_factor(depth_meters: u32) -> f64 {
    if depth_meters > 50 {
        0.8
    } else if depth_meters > 30 {
        0.6
    } else {
        0.4
    }
}

/// `round(depth * confidence/100 * 0.8)`, in meters.
pub fn water_level(depth_meters: u32, confidence: u8) -> u32 {
    let level = f64::from(depth_meters) * (f64::from(confidence) / 100.0) * WATER_LEVEL_RATIO;
    round_half_up(level) as u32
}

/// `round(water_level * 1.5)`.
pub fn estimated_yield(water_level: u32) -> u32 {
    round_half_up(f64::from(water_level) * YIELD_MULTIPLIER) as u32
}

/// Score a request, stamping the result with the current time.
pub fn score(request: &PredictionRequest) -> PredictionResult {
    score_at(request, Utc::now())
}

/// Score a request with an explicit creation instant.
pub fn score_at(request: &PredictionRequest, now: DateTime<Utc>) -> PredictionResult {
    let breakdown = ScoreBreakdown::for_request(request);
    let confidence = breakdown.confidence();
    let water_level = water_level(request.depth(), confidence);
    let recommendation = Recommendation::for_confidence(confidence);

    debug!(
        soil = breakdown.soil,
        rock = breakdown.rock,
        depth = breakdown.depth,
        confidence,
        water_level,
        "scored prediction request"
    );

    let values = [
        percent(breakdown.soil),
        percent(breakdown.rock),
        percent(breakdown.depth),
        u32::from(confidence),
    ];

    PredictionResult {
        id: PredictionId::generate_at(now),
        confidence,
        water_level,
        estimated_yield: estimated_yield(water_level),
        recommendation,
        best_time: BEST_DRILLING_TIME.to_string(),
        location: Location::new(request.latitude(), request.longitude()),
        timestamp: now,
        chart_data: CHART_LABELS
            .iter()
            .zip(values)
            .map(|(label, value)| ChartPoint::new(*label, value))
            .collect(),
    }
}

fn percent(factor: f64) -> u32 {
    round_half_up(factor * 100.0) as u32
}

// Inputs are non-negative, so `round` is half-up here.
fn round_half_up(value: f64) -> f64 {
    value.round()
}
