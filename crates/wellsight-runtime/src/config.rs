//! Configuration for the wellsight runtime

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use wellsight_store::{HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore};

/// Environment variable prefix, e.g. `WELLSIGHT_LIFECYCLE__SIMULATED_LATENCY_MS`.
pub const ENV_PREFIX: &str = "WELLSIGHT";

/// Main runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WellsightConfig {
    /// History storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Prediction lifecycle
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Mock weather service
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where prediction history is kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Process-local only (for development/testing)
    Memory,

    /// One JSON file, rewritten atomically on every append
    JsonFile {
        #[serde(default = "default_history_path")]
        path: PathBuf,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::JsonFile {
            path: default_history_path(),
        }
    }
}

impl StorageConfig {
    /// Build the configured backend.
    pub fn open(&self) -> Arc<dyn HistoryStore> {
        match self {
            StorageConfig::Memory => Arc::new(InMemoryHistoryStore::new()),
            StorageConfig::JsonFile { path } => Arc::new(JsonFileHistoryStore::new(path)),
        }
    }
}

/// How a `submit` is treated while another prediction is still pending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Every request resolves and is recorded; the last one to resolve
    /// becomes `current`.
    #[default]
    Supersede,

    /// Refuse new submissions until the pending one resolves.
    Reject,
}

/// Prediction lifecycle configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Artificial delay before scoring, in milliseconds
    #[serde(default = "default_prediction_latency")]
    pub simulated_latency_ms: u64,

    /// Overlapping submission handling
    #[serde(default)]
    pub overlap: OverlapPolicy,

    /// Capacity of the lifecycle event channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_prediction_latency(),
            overlap: OverlapPolicy::default(),
            event_buffer: default_event_buffer(),
        }
    }
}

impl LifecycleConfig {
    /// No artificial delay; handy in tests.
    pub fn immediate() -> Self {
        Self {
            simulated_latency_ms: 0,
            ..Default::default()
        }
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

/// Mock weather configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Artificial delay per call, in milliseconds
    #[serde(default = "default_weather_latency")]
    pub simulated_latency_ms: u64,

    /// Fixed RNG seed for reproducible readings
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_weather_latency(),
            seed: None,
        }
    }
}

impl WeatherConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_history_path() -> PathBuf {
    PathBuf::from(".wellsight").join(wellsight_store::DEFAULT_HISTORY_FILE)
}

fn default_prediction_latency() -> u64 {
    2000
}

fn default_event_buffer() -> usize {
    64
}

fn default_weather_latency() -> u64 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

impl WellsightConfig {
    /// Load configuration: defaults, then the file (if given), then
    /// `WELLSIGHT_*` environment variables with `__` between sections.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&WellsightConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: WellsightConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.lifecycle.event_buffer == 0 {
            return Err(ConfigError::Invalid(
                "lifecycle.event_buffer must be at least 1".to_string(),
            ));
        }
        if let StorageConfig::JsonFile { path } = &self.storage {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "storage.path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// In-memory storage and no artificial delays.
    pub fn ephemeral() -> Self {
        Self {
            storage: StorageConfig::Memory,
            lifecycle: LifecycleConfig::immediate(),
            weather: WeatherConfig {
                simulated_latency_ms: 0,
                seed: None,
            },
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WellsightConfig::default();
        assert_eq!(config.lifecycle.simulated_latency_ms, 2000);
        assert_eq!(config.lifecycle.overlap, OverlapPolicy::Supersede);
        assert_eq!(config.logging.level, "info");
        assert!(matches!(config.storage, StorageConfig::JsonFile { .. }));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = WellsightConfig::load(None).unwrap();
        assert_eq!(config.weather.simulated_latency_ms, 300);
        assert_eq!(config.lifecycle.event_buffer, 64);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellsight.toml");
        std::fs::write(
            &path,
            r#"
[storage]
type = "memory"

[lifecycle]
simulated_latency_ms = 10
overlap = "reject"

[weather]
seed = 7
"#,
        )
        .unwrap();

        let config = WellsightConfig::load(Some(&path)).unwrap();
        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.lifecycle.simulated_latency(), Duration::from_millis(10));
        assert_eq!(config.lifecycle.overlap, OverlapPolicy::Reject);
        assert_eq!(config.weather.seed, Some(7));
    }

    #[test]
    fn test_zero_event_buffer_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[lifecycle]\nevent_buffer = 0\n").unwrap();

        let err = WellsightConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_ephemeral_profile() {
        let config = WellsightConfig::ephemeral();
        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.lifecycle.simulated_latency(), Duration::ZERO);
    }
}
