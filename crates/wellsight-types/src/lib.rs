//! Wellsight Types - core data model for groundwater predictions.
//!
//! ## Key Concepts
//!
//! - **PredictionDraft**: raw, possibly incomplete caller input
//! - **PredictionRequest**: a validated draft, immutable once submitted
//! - **PredictionResult**: the full output record of one scoring run
//! - **PredictionId**: time-derived identifier, unique per process
//!
//! Validation happens exactly once, when a draft becomes a request. Nothing
//! downstream of a `PredictionRequest` needs to re-check ranges.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod error;
pub mod geology;
pub mod request;
pub mod result;

pub use error::ValidationError;
pub use geology::{RockType, SoilType};
pub use request::{PredictionDraft, PredictionRequest, DEPTH_RANGE_METERS};
pub use result::{
    ChartPoint, Location, PredictionId, PredictionResult, Recommendation, BEST_DRILLING_TIME,
    CHART_LABELS,
};
