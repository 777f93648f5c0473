//! Site distance command

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use wellsight_runtime::geolocation::GeoFix;
use wellsight_runtime::sites::{SiteDistance, SiteRegistry};

use crate::output::{print_output, OutputFormat};

#[derive(Args)]
pub struct DistanceArgs {
    /// Reference point as LAT,LON (defaults to the fallback location)
    #[arg(long, value_parser = parse_coordinates, allow_hyphen_values = true)]
    pub from: Option<(f64, f64)>,

    /// Candidate sites as LAT,LON
    #[arg(required = true, value_parser = parse_coordinates, allow_hyphen_values = true)]
    pub sites: Vec<(f64, f64)>,
}

#[derive(Serialize, Tabled)]
struct DistanceRow {
    #[tabled(rename = "Site")]
    title: String,
    #[tabled(rename = "Latitude")]
    latitude: f64,
    #[tabled(rename = "Longitude")]
    longitude: f64,
    #[tabled(rename = "Distance (km)")]
    distance_km: String,
}

impl From<SiteDistance> for DistanceRow {
    fn from(d: SiteDistance) -> Self {
        Self {
            title: d.site.title,
            latitude: d.site.latitude,
            longitude: d.site.longitude,
            distance_km: format!("{:.2}", d.distance_km),
        }
    }
}

fn parse_coordinates(value: &str) -> Result<(f64, f64), String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{value}'"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("bad latitude '{lat}'"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("bad longitude '{lon}'"))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} out of range"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(format!("longitude {lon} out of range"));
    }
    Ok((lat, lon))
}

pub fn execute(args: DistanceArgs, format: OutputFormat) -> anyhow::Result<()> {
    let origin = args
        .from
        .map(|(lat, lon)| GeoFix::new(lat, lon, 0.0))
        .unwrap_or(GeoFix::FALLBACK);

    let mut registry = SiteRegistry::new();
    for (lat, lon) in args.sites {
        registry.mark(lat, lon);
    }

    let rows = registry
        .distances_from(&origin)
        .into_iter()
        .map(DistanceRow::from)
        .collect();
    print_output::<DistanceRow>(rows, format)
}
