//! CLI command implementations

pub mod advisor;
pub mod distance;
pub mod history;
pub mod predict;
pub mod soils;
pub mod weather;
