//! JSON-file history store.
//!
//! The whole history lives in one JSON array. Every append rewrites the file
//! in full: write to `<name>.tmp`, then rename over the target. The cached
//! copy is only advanced after the rename succeeds.

use crate::traits::HistoryStore;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use wellsight_types::PredictionResult;

/// File name used when only a directory is configured.
pub const DEFAULT_HISTORY_FILE: &str = "predictions.json";

#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    cache: Mutex<Option<Vec<PredictionResult>>>,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// Store at `<dir>/predictions.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_HISTORY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_from_disk(&self) -> StoreResult<Vec<PredictionResult>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            StoreError::Corrupt(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn write_atomically(&self, records: &[PredictionResult]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn load(&self) -> StoreResult<Vec<PredictionResult>> {
        let mut cache = self.cache.lock().await;
        let records = self.read_from_disk().await?;
        debug!(path = %self.path.display(), count = records.len(), "loaded prediction history");
        *cache = Some(records.clone());
        Ok(records)
    }

    async fn append(&self, result: PredictionResult) -> StoreResult<()> {
        let mut cache = self.cache.lock().await;

        let mut records = match cache.as_ref() {
            Some(records) => records.clone(),
            None => match self.read_from_disk().await {
                Ok(records) => records,
                Err(StoreError::Corrupt(reason)) => {
                    warn!(%reason, "discarding corrupt history before append");
                    Vec::new()
                }
                Err(e) => return Err(e),
            },
        };
        records.push(result);

        self.write_atomically(&records).await?;
        *cache = Some(records);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use wellsight_types::PredictionDraft;

    fn sample(soil: &str, depth: i64) -> PredictionResult {
        sample_at(soil, depth, -33.8688, 151.2093)
    }

    fn sample_at(soil: &str, depth: i64, latitude: f64, longitude: f64) -> PredictionResult {
        let request = PredictionDraft::new()
            .soil(soil)
            .rock("sedimentary")
            .depth(depth)
            .coordinates(latitude, longitude)
            .validate()
            .unwrap();
        wellsight_engine::score(&request)
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::in_dir(dir.path());
        assert!(store.load().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn appends_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let store = JsonFileHistoryStore::new(&path);
        store.load().await.unwrap();
        let first = sample("clay", 60);
        let second = sample("sandy", 25);
        store.append(first.clone()).await.unwrap();
        store.append(second.clone()).await.unwrap();

        let reopened = JsonFileHistoryStore::new(&path);
        assert_eq!(reopened.load().await.unwrap(), vec![first, second]);
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_then_replaced_on_append() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::in_dir(dir.path());
        std::fs::write(store.path(), "{not json").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));

        let record = sample("loamy", 90);
        store.append(record.clone()).await.unwrap();
        let reopened = JsonFileHistoryStore::new(store.path());
        assert_eq!(reopened.load().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::in_dir(dir.path());
        let kept = sample("clay", 40);
        store.append(kept.clone()).await.unwrap();

        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(store.path().with_extension("tmp")).unwrap();
        assert!(store.append(sample("rocky", 15)).await.is_err());

        let reopened = JsonFileHistoryStore::new(store.path());
        assert_eq!(reopened.load().await.unwrap(), vec![kept.clone()]);

        std::fs::remove_dir(store.path().with_extension("tmp")).unwrap();
        let next = sample("rocky", 15);
        store.append(next.clone()).await.unwrap();
        assert_eq!(reopened.load().await.unwrap(), vec![kept, next]);
    }

    fn history_strategy() -> impl Strategy<Value = Vec<PredictionResult>> {
        let soil = prop_oneof![Just("clay"), Just("sandy"), Just("loamy"), Just("rocky")];
        let entry = (soil, 10i64..=200, -90.0f64..=90.0, -180.0f64..=180.0);
        prop::collection::vec(entry, 1..12).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(soil, depth, lat, lon)| sample_at(soil, depth, lat, lon))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn serialized_history_round_trips(history in history_strategy()) {
            let json = serde_json::to_string(&history).unwrap();
            let decoded: Vec<PredictionResult> = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(decoded, history);
        }
    }

    #[tokio::test]
    async fn coordinates_survive_reopen_bit_for_bit() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::in_dir(dir.path());
        let stored = sample_at("loamy", 80, 0.0, 111.02714586194493);
        store.append(stored.clone()).await.unwrap();

        let reopened = JsonFileHistoryStore::in_dir(dir.path());
        let loaded = reopened.load().await.unwrap();
        assert_eq!(
            loaded[0].location.longitude.to_bits(),
            stored.location.longitude.to_bits()
        );
        assert_eq!(loaded, vec![stored]);
    }
}
