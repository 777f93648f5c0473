//! Device location with a fixed fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use wellsight_types::PredictionDraft;

/// How long a provider is given before the fallback is used.
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(10);

/// A position fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
}

impl GeoFix {
    /// New York City, used whenever no real fix is available.
    pub const FALLBACK: GeoFix = GeoFix {
        latitude: 40.7128,
        longitude: -74.0060,
        accuracy_meters: 1000.0,
    };

    pub fn new(latitude: f64, longitude: f64, accuracy_meters: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters,
        }
    }

    /// Fill the coordinates of a draft from this fix.
    pub fn fill(&self, draft: PredictionDraft) -> PredictionDraft {
        draft.coordinates(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("geolocation is not supported")]
    Unsupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("location request timed out")]
    Timeout,

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Source of position fixes.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn locate(&self) -> Result<GeoFix, LocationError>;
}

/// Ask `provider` for a fix, falling back to [`GeoFix::FALLBACK`].
///
/// Never fails. Providers slower than [`LOCATE_TIMEOUT`] count as timed out.
pub async fn resolve_location(provider: &dyn LocationProvider) -> GeoFix {
    let outcome = match tokio::time::timeout(LOCATE_TIMEOUT, provider.locate()).await {
        Ok(outcome) => outcome,
        Err(_) => Err(LocationError::Timeout),
    };

    match outcome {
        Ok(fix) => fix,
        Err(e) => {
            warn!(error = %e, "using fallback location");
            GeoFix::FALLBACK
        }
    }
}

/// Always returns the same fix.
#[derive(Debug, Clone, Copy)]
pub struct StaticLocationProvider {
    fix: GeoFix,
}

impl StaticLocationProvider {
    pub fn new(fix: GeoFix) -> Self {
        Self { fix }
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn locate(&self) -> Result<GeoFix, LocationError> {
        Ok(self.fix)
    }
}

/// Always fails with the given error.
#[derive(Debug, Clone)]
pub struct UnavailableLocationProvider {
    error: LocationError,
}

impl UnavailableLocationProvider {
    pub fn new(error: LocationError) -> Self {
        Self { error }
    }
}

impl Default for UnavailableLocationProvider {
    fn default() -> Self {
        Self::new(LocationError::Unsupported)
    }
}

#[async_trait]
impl LocationProvider for UnavailableLocationProvider {
    async fn locate(&self) -> Result<GeoFix, LocationError> {
        Err(self.error.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HangingProvider;

    #[async_trait]
    impl LocationProvider for HangingProvider {
        async fn locate(&self) -> Result<GeoFix, LocationError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn static_fix_is_used() {
        let fix = GeoFix::new(12.97, 77.59, 15.0);
        let resolved = resolve_location(&StaticLocationProvider::new(fix)).await;
        assert_eq!(resolved, fix);
    }

    #[tokio::test]
    async fn errors_fall_back() {
        let provider = UnavailableLocationProvider::new(LocationError::PermissionDenied);
        assert_eq!(resolve_location(&provider).await, GeoFix::FALLBACK);
        assert_eq!(GeoFix::FALLBACK.accuracy_meters, 1000.0);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out_to_fallback() {
        assert_eq!(resolve_location(&HangingProvider).await, GeoFix::FALLBACK);
    }

    #[test]
    fn fix_fills_draft_coordinates() {
        let draft = GeoFix::FALLBACK.fill(PredictionDraft::new());
        assert_eq!(draft.latitude, Some(40.7128));
        assert_eq!(draft.longitude, Some(-74.0060));
    }
}
