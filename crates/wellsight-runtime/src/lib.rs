//! # Wellsight Runtime
//!
//! Runtime surfaces for the groundwater prediction dashboard.
//!
//! ## Overview
//!
//! - **Lifecycle**: [`PredictionController`] owns asynchronous submission
//!   state (Idle, Pending, Succeeded, Failed), the latest result, and the
//!   append-only history persisted through a [`HistoryStore`]
//! - **Configuration**: [`WellsightConfig`] loaded from defaults, an optional
//!   file, and `WELLSIGHT_*` environment variables
//! - **Telemetry**: `tracing` subscriber setup
//! - **Collaborators**: geolocation with fallback, mock weather, site markers
//!   with haversine distances, the FAQ advisor, the soil/rock reference
//!   table, and report export
//!
//! Collaborators never touch lifecycle state; they either feed a
//! [`PredictionDraft`](wellsight_types::PredictionDraft) or consume a
//! finished [`PredictionResult`](wellsight_types::PredictionResult).
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wellsight_runtime::{LifecycleConfig, PredictionController};
//! use wellsight_store::InMemoryHistoryStore;
//! use wellsight_types::PredictionDraft;
//!
//! # async fn example() {
//! let controller = PredictionController::with_mock_scorer(
//!     LifecycleConfig::default(),
//!     Arc::new(InMemoryHistoryStore::new()),
//! )
//! .await;
//!
//! let draft = PredictionDraft::new()
//!     .soil("clay")
//!     .rock("sedimentary")
//!     .depth(60)
//!     .coordinates(40.7128, -74.006);
//!
//! let pending = controller.submit(draft).await.unwrap();
//! let result = pending.wait().await.unwrap();
//! println!("confidence: {}%", result.confidence);
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

pub mod advisor;
pub mod config;
mod error;
pub mod geolocation;
pub mod lifecycle;
pub mod reference;
pub mod report;
pub mod sites;
pub mod telemetry;
pub mod weather;

pub use config::{
    LifecycleConfig, LoggingConfig, OverlapPolicy, StorageConfig, WeatherConfig, WellsightConfig,
};
pub use error::{ConfigError, LifecycleError, LifecycleResult, ReportError};
pub use lifecycle::{
    HistorySummary, LifecycleEvent, LifecycleSnapshot, LifecycleStatus, PendingPrediction,
    PredictionController,
};

pub use wellsight_store::HistoryStore;
