//! Markdown prediction reports.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;
use wellsight_types::PredictionResult;

use crate::error::ReportError;

pub const DEFAULT_REPORT_FILE: &str = "water-well-prediction-report.md";

/// Render a result as a standalone Markdown document.
pub fn render_report(result: &PredictionResult) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "# Water Well Prediction Report\n");
    let _ = writeln!(out, "- Prediction: {}", result.id);
    let _ = writeln!(
        out,
        "- Generated: {}",
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "- Location: {}\n", result.location);

    let _ = writeln!(out, "## Results\n");
    let _ = writeln!(out, "| Metric | Value |");
    let _ = writeln!(out, "|---|---|");
    let _ = writeln!(out, "| Success probability | {}% |", result.confidence);
    let _ = writeln!(out, "| Expected water level | {} m |", result.water_level);
    let _ = writeln!(out, "| Estimated yield | {} L/h |", result.estimated_yield);
    let _ = writeln!(out, "| Recommendation | {} |", result.recommendation);
    let _ = writeln!(out, "| Best drilling time | {} |\n", result.best_time);

    let _ = writeln!(out, "## Score Breakdown\n");
    let _ = writeln!(out, "| Factor | Score |");
    let _ = writeln!(out, "|---|---|");
    for point in &result.chart_data {
        let _ = writeln!(out, "| {} | {} |", point.label, point.value);
    }

    out
}

/// Write the report for `result` to `path`, creating parent directories.
pub async fn export_report(
    result: &PredictionResult,
    path: impl AsRef<Path>,
) -> Result<PathBuf, ReportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ReportError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(path, render_report(result))
        .await
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!(id = %result.id, path = %path.display(), "prediction report exported");
    Ok(path.to_path_buf())
}
