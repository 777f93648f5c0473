use crate::StoreResult;
use async_trait::async_trait;
use wellsight_types::PredictionResult;

/// Durable, append-only prediction history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Read the full history, oldest first.
    ///
    /// A missing slot is an empty history. Malformed content is reported as
    /// [`StoreError::Corrupt`](crate::StoreError::Corrupt); deciding how to
    /// recover is the caller's job.
    async fn load(&self) -> StoreResult<Vec<PredictionResult>>;

    /// Append one record. On error, previously stored history is intact.
    async fn append(&self, result: PredictionResult) -> StoreResult<()>;

    /// Backend name for logs.
    fn describe(&self) -> String;
}
