use std::path::PathBuf;

use thiserror::Error;
use wellsight_engine::EngineError;
use wellsight_types::ValidationError;

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Why a submission did not produce a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    #[error("invalid prediction request: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("a prediction is already pending")]
    Busy,

    #[error("prediction task ended before reporting a result")]
    Abandoned,
}

impl LifecycleError {
    /// Validation failures are the caller's to fix; the rest may be retried as-is.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Report export errors.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create report directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
