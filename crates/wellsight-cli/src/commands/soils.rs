//! Soil and rock reference command

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use wellsight_runtime::reference::{search, KindFilter, MaterialEntry};

use crate::output::{print_output, OutputFormat};

#[derive(Args)]
pub struct SoilsArgs {
    /// Text to look for in names and descriptions
    #[arg(short, long)]
    pub search: Option<String>,

    /// Restrict to one kind (all, soil, rock)
    #[arg(long, default_value = "all")]
    pub kind: KindFilter,
}

#[derive(Serialize, Tabled)]
struct MaterialRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Water Retention")]
    water_retention: String,
    #[tabled(rename = "Drilling")]
    drilling_difficulty: String,
    #[tabled(rename = "Permeability")]
    permeability: String,
    #[tabled(rename = "Suitability")]
    suitability: String,
}

impl From<&MaterialEntry> for MaterialRow {
    fn from(m: &MaterialEntry) -> Self {
        Self {
            name: m.name,
            kind: m.kind.to_string(),
            category: m.category,
            water_retention: format!("{:?}", m.water_retention),
            drilling_difficulty: format!("{:?}", m.drilling_difficulty),
            permeability: format!("{:?}", m.permeability),
            suitability: format!("{}%", m.suitability),
        }
    }
}

pub fn execute(args: SoilsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let matches = search(args.search.as_deref().unwrap_or(""), args.kind);

    match format {
        OutputFormat::Json => crate::output::print_json(&matches),
        OutputFormat::Table => {
            let rows: Vec<MaterialRow> = matches.into_iter().map(MaterialRow::from).collect();
            print_output(rows, format)
        }
    }
}
