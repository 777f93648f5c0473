use thiserror::Error;

/// Reasons a draft cannot become a `PredictionRequest`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("depth must be between {min} and {max} meters, got {value}")]
    DepthOutOfRange { value: i64, min: u32, max: u32 },

    #[error("latitude must be a finite value between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),

    #[error("longitude must be a finite value between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
            Self::DepthOutOfRange { .. } => "depth",
            Self::LatitudeOutOfRange(_) => "latitude",
            Self::LongitudeOutOfRange(_) => "longitude",
        }
    }
}
