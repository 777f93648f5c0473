//! Prediction command

use std::path::PathBuf;

use clap::Args;
use colored::*;
use serde::Serialize;
use tabled::Tabled;
use wellsight_runtime::geolocation::{
    resolve_location, GeoFix, StaticLocationProvider, UnavailableLocationProvider,
};
use wellsight_runtime::report::{export_report, DEFAULT_REPORT_FILE};
use wellsight_runtime::{PredictionController, WellsightConfig};
use wellsight_types::{PredictionDraft, PredictionResult, Recommendation};

use crate::output::{
    print_field, print_info, print_json, print_output, print_success, OutputFormat,
};

#[derive(Args)]
pub struct PredictArgs {
    /// Soil type (clay, sandy, loamy, rocky)
    #[arg(long)]
    pub soil: Option<String>,

    /// Rock type (sedimentary, igneous, metamorphic)
    #[arg(long)]
    pub rock: Option<String>,

    /// Planned depth in meters (10-200)
    #[arg(long, allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Site latitude; the fallback location is used when omitted
    #[arg(long, requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Site longitude
    #[arg(long, requires = "latitude", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Write a Markdown report (default file name when no path is given)
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_REPORT_FILE)]
    pub export: Option<PathBuf>,
}

#[derive(Serialize, Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Factor")]
    label: String,
    #[tabled(rename = "Score")]
    value: u32,
}

pub async fn execute(
    args: PredictArgs,
    config: &WellsightConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let fix = match (args.latitude, args.longitude) {
        (Some(lat), Some(lon)) => {
            resolve_location(&StaticLocationProvider::new(GeoFix::new(lat, lon, 0.0))).await
        }
        _ => resolve_location(&UnavailableLocationProvider::default()).await,
    };

    let mut draft = fix.fill(PredictionDraft::new());
    draft.soil_type = args.soil;
    draft.rock_type = args.rock;
    draft.depth = args.depth;

    let controller = PredictionController::with_mock_scorer(
        config.lifecycle.clone(),
        config.storage.open(),
    )
    .await;

    if format == OutputFormat::Table {
        print_info("Analyzing site...");
    }
    let result = controller.submit(draft).await?.wait().await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_result(&result)?,
    }

    if let Some(path) = args.export {
        let written = export_report(&result, &path).await?;
        if format == OutputFormat::Table {
            print_success(&format!("Report written to {}", written.display()));
        }
    }

    Ok(())
}

fn print_result(result: &PredictionResult) -> anyhow::Result<()> {
    let recommendation = match result.recommendation {
        Recommendation::Excellent => result.recommendation.as_str().green(),
        Recommendation::Good => result.recommendation.as_str().yellow(),
        Recommendation::Poor => result.recommendation.as_str().red(),
    };

    println!();
    print_field("Success probability", format!("{}%", result.confidence).bold());
    print_field("Expected water level", format!("{} m", result.water_level));
    print_field("Estimated yield", format!("{} L/h", result.estimated_yield));
    print_field("Recommendation", recommendation);
    print_field("Best drilling time", &result.best_time);
    print_field("Location", result.location);
    println!();

    let rows = result
        .chart_data
        .iter()
        .map(|p| BreakdownRow {
            label: p.label.clone(),
            value: p.value,
        })
        .collect();
    print_output::<BreakdownRow>(rows, OutputFormat::Table)
}
