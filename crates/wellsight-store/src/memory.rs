//! In-memory history store.
//!
//! Deterministic and test-friendly. Appends can be switched to fail so that
//! callers can exercise their persistence-error paths.

use crate::traits::HistoryStore;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use wellsight_types::PredictionResult;

#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<PredictionResult>>,
    fail_appends: AtomicBool,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing records, oldest first.
    pub fn with_records(records: Vec<PredictionResult>) -> Self {
        Self {
            records: RwLock::new(records),
            fail_appends: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `append` fail (or succeed again).
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self) -> StoreResult<Vec<PredictionResult>> {
        Ok(self.records.read().await.clone())
    }

    async fn append(&self, result: PredictionResult) -> StoreResult<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(format!(
                "append of prediction {} rejected",
                result.id
            )));
        }
        self.records.write().await.push(result);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellsight_types::PredictionDraft;

    fn sample(depth: i64) -> PredictionResult {
        let request = PredictionDraft::new()
            .soil("clay")
            .rock("igneous")
            .depth(depth)
            .coordinates(1.0, 2.0)
            .validate()
            .unwrap();
        wellsight_engine::score(&request)
    }

    #[tokio::test]
    async fn appends_are_loaded_in_order() {
        let store = InMemoryHistoryStore::new();
        let first = sample(20);
        let second = sample(80);
        store.append(first.clone()).await.unwrap();
        store.append(second.clone()).await.unwrap();

        assert_eq!(store.load().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn failing_appends_leave_history_untouched() {
        let store = InMemoryHistoryStore::with_records(vec![sample(40)]);
        store.set_fail_appends(true);

        let err = store.append(sample(60)).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert_eq!(store.len().await, 1);

        store.set_fail_appends(false);
        store.append(sample(60)).await.unwrap();
        assert_eq!(store.len().await, 2);
    }
}
