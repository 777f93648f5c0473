//! Wellsight durable history storage.
//!
//! The lifecycle controller persists its prediction history through the
//! [`HistoryStore`] trait:
//! - `load` is called once, when the controller opens
//! - `append` is called after every successful prediction
//!
//! Backends:
//! - [`InMemoryHistoryStore`] for tests and ephemeral sessions
//! - [`JsonFileHistoryStore`], one JSON array per file, rewritten atomically

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod error;
pub mod json_file;
pub mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use json_file::{JsonFileHistoryStore, DEFAULT_HISTORY_FILE};
pub use memory::InMemoryHistoryStore;
pub use traits::HistoryStore;
