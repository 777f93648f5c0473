use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored history is corrupt: {0}")]
    Corrupt(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Backend(String),
}
