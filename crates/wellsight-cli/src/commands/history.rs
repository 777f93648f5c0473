//! Prediction history command

use serde::Serialize;
use tabled::Tabled;
use wellsight_runtime::{HistorySummary, PredictionController, WellsightConfig};
use wellsight_types::PredictionResult;

use crate::output::{print_field, print_json, print_output, OutputFormat};

#[derive(Serialize, Tabled)]
struct HistoryRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Water Level (m)")]
    water_level: u32,
    #[tabled(rename = "Yield (L/h)")]
    estimated_yield: u32,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&PredictionResult> for HistoryRow {
    fn from(r: &PredictionResult) -> Self {
        Self {
            id: r.id.as_u64(),
            date: r.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            confidence: format!("{}%", r.confidence),
            water_level: r.water_level,
            estimated_yield: r.estimated_yield,
            location: r.location.to_string(),
        }
    }
}

#[derive(Serialize)]
struct HistoryReport<'a> {
    summary: &'a HistorySummary,
    predictions: &'a [PredictionResult],
}

pub async fn execute(
    summary_only: bool,
    config: &WellsightConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let controller =
        PredictionController::with_mock_scorer(config.lifecycle.clone(), config.storage.open())
            .await;
    let snapshot = controller.snapshot().await;
    let summary = snapshot.summary();

    if format == OutputFormat::Json {
        return if summary_only {
            print_json(&summary)
        } else {
            print_json(&HistoryReport {
                summary: &summary,
                predictions: &snapshot.history,
            })
        };
    }

    if !summary_only {
        // Newest first, like the dashboard.
        let rows = snapshot.history.iter().rev().map(HistoryRow::from).collect();
        print_output::<HistoryRow>(rows, format)?;
        println!();
    }

    print_field("Total predictions", summary.total);
    if let Some(avg) = summary.average_confidence {
        print_field("Average confidence", format!("{avg:.1}%"));
    }
    if let Some(best) = summary.best_confidence {
        print_field("Best confidence", format!("{best}%"));
    }
    print_field("Excellent sites", summary.excellent_sites);
    if let Some(at) = summary.last_prediction_at {
        print_field("Last prediction", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    Ok(())
}
