//! Prediction inputs: unvalidated drafts and validated requests.

use crate::error::ValidationError;
use crate::geology::{RockType, SoilType};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Accepted drilling depth, in meters.
pub const DEPTH_RANGE_METERS: RangeInclusive<u32> = 10..=200;

/// Raw prediction input as collected from a form or command line.
///
/// Every field is optional so that missing values surface as
/// [`ValidationError::MissingField`] rather than as parse failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionDraft {
    pub soil_type: Option<String>,
    pub rock_type: Option<String>,
    pub depth: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PredictionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn soil(mut self, soil_type: impl Into<String>) -> Self {
        self.soil_type = Some(soil_type.into());
        self
    }

    pub fn rock(mut self, rock_type: impl Into<String>) -> Self {
        self.rock_type = Some(rock_type.into());
        self
    }

    pub fn depth(mut self, depth: i64) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Check every field and produce an immutable request.
    ///
    /// Fields are checked in form order, and the first problem wins.
    pub fn validate(&self) -> Result<PredictionRequest, ValidationError> {
        let soil_type = required_text(self.soil_type.as_deref(), "soil type")?;
        let rock_type = required_text(self.rock_type.as_deref(), "rock type")?;

        let depth = self.depth.ok_or(ValidationError::MissingField("depth"))?;
        let depth = u32::try_from(depth)
            .ok()
            .filter(|d| DEPTH_RANGE_METERS.contains(d))
            .ok_or(ValidationError::DepthOutOfRange {
                value: depth,
                min: *DEPTH_RANGE_METERS.start(),
                max: *DEPTH_RANGE_METERS.end(),
            })?;

        let latitude = self
            .latitude
            .ok_or(ValidationError::MissingField("latitude"))?;
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange(latitude));
        }

        let longitude = self
            .longitude
            .ok_or(ValidationError::MissingField("longitude"))?;
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange(longitude));
        }

        Ok(PredictionRequest {
            soil_type: SoilType::from(soil_type),
            rock_type: RockType::from(rock_type),
            depth,
            latitude,
            longitude,
        })
    }
}

fn required_text<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

/// A validated scoring request. Only [`PredictionDraft::validate`] builds one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    soil_type: SoilType,
    rock_type: RockType,
    depth: u32,
    latitude: f64,
    longitude: f64,
}

impl PredictionRequest {
    pub fn soil_type(&self) -> &SoilType {
        &self.soil_type
    }

    pub fn rock_type(&self) -> &RockType {
        &self.rock_type
    }

    /// Depth in meters, always within [`DEPTH_RANGE_METERS`].
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl TryFrom<PredictionDraft> for PredictionRequest {
    type Error = ValidationError;

    fn try_from(draft: PredictionDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> PredictionDraft {
        PredictionDraft::new()
            .soil("clay")
            .rock("sedimentary")
            .depth(60)
            .coordinates(40.7128, -74.006)
    }

    #[test]
    fn complete_draft_validates() {
        let request = complete().validate().unwrap();
        assert_eq!(request.soil_type(), &SoilType::Clay);
        assert_eq!(request.rock_type(), &RockType::Sedimentary);
        assert_eq!(request.depth(), 60);
        assert_eq!(request.latitude(), 40.7128);
    }

    #[test]
    fn missing_fields_are_reported_in_form_order() {
        let err = PredictionDraft::new().validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField("soil type"));

        let err = PredictionDraft::new().soil("clay").validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField("rock type"));

        let mut draft = complete();
        draft.longitude = None;
        assert_eq!(draft.validate().unwrap_err().field(), "longitude");
    }

    #[test]
    fn blank_category_counts_as_missing() {
        let err = complete().soil("   ").validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField("soil type"));
    }

    #[test]
    fn depth_bounds_are_inclusive() {
        assert!(complete().depth(10).validate().is_ok());
        assert!(complete().depth(200).validate().is_ok());

        let err = complete().depth(9).validate().unwrap_err();
        assert!(matches!(err, ValidationError::DepthOutOfRange { value: 9, .. }));
        assert!(complete().depth(201).validate().is_err());
        assert!(complete().depth(-5).validate().is_err());
    }

    #[test]
    fn coordinates_must_be_finite_and_in_range() {
        assert!(complete().coordinates(91.0, 0.0).validate().is_err());
        assert!(complete().coordinates(0.0, -180.5).validate().is_err());
        assert!(complete().coordinates(f64::NAN, 0.0).validate().is_err());
        assert!(complete().coordinates(-90.0, 180.0).validate().is_ok());
    }

    #[test]
    fn unknown_categories_pass_validation() {
        let request = complete().rock("basalt").validate().unwrap();
        assert_eq!(request.rock_type(), &RockType::Other("basalt".to_string()));
    }
}
