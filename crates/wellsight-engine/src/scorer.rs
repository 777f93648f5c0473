use thiserror::Error;
use wellsight_types::{PredictionRequest, PredictionResult};

/// Failures a scoring backend may report.
///
/// The lookup-table engine never produces these; they exist so callers keep
/// a failure path for backends that can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("scoring backend unavailable: {0}")]
    Unavailable(String),

    #[error("scoring failed: {0}")]
    Failed(String),
}

/// Something that turns a validated request into a result.
pub trait Scorer: Send + Sync {
    fn score(&self, request: &PredictionRequest) -> Result<PredictionResult, EngineError>;

    /// Short backend name for logs.
    fn name(&self) -> &str {
        "scorer"
    }
}

/// The lookup-table engine behind the [`Scorer`] seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockScorer;

impl MockScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Scorer for MockScorer {
    fn score(&self, request: &PredictionRequest) -> Result<PredictionResult, EngineError> {
        Ok(crate::score(request))
    }

    fn name(&self) -> &str {
        "mock-lookup-table"
    }
}
