//! Weather commands

use clap::Args;
use colored::*;
use serde::Serialize;
use tabled::Tabled;
use wellsight_runtime::geolocation::GeoFix;
use wellsight_runtime::weather::{
    CurrentWeather, DailyWeather, MockWeatherService, WeatherImpact, WeatherService,
};
use wellsight_runtime::WellsightConfig;

use crate::output::{print_field, print_json, print_output, print_warning, OutputFormat};

#[derive(Args)]
pub struct WeatherArgs {
    /// Latitude (defaults to the fallback location)
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude (defaults to the fallback location)
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Also show the last seven days
    #[arg(long)]
    pub history: bool,
}

#[derive(Serialize, Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Temp (°C)")]
    temperature: i32,
    #[tabled(rename = "Humidity (%)")]
    humidity: u32,
    #[tabled(rename = "Rainfall (mm)")]
    rainfall: u32,
}

impl From<&DailyWeather> for DayRow {
    fn from(d: &DailyWeather) -> Self {
        Self {
            date: d.date.to_string(),
            temperature: d.temperature,
            humidity: d.humidity,
            rainfall: d.rainfall,
        }
    }
}

#[derive(Serialize)]
struct WeatherReport {
    current: CurrentWeather,
    impact: WeatherImpact,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<DailyWeather>>,
}

pub async fn execute(
    args: WeatherArgs,
    config: &WellsightConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let latitude = args.latitude.unwrap_or(GeoFix::FALLBACK.latitude);
    let longitude = args.longitude.unwrap_or(GeoFix::FALLBACK.longitude);

    let service = MockWeatherService::new(&config.weather);
    let current = service.current(latitude, longitude).await?;
    let impact = WeatherImpact::assess(&current);
    let history = if args.history {
        Some(service.history(latitude, longitude).await?)
    } else {
        None
    };

    if format == OutputFormat::Json {
        return print_json(&WeatherReport {
            current,
            impact,
            history,
        });
    }

    print_field("Location", &current.location);
    print_field("Conditions", &current.description);
    print_field("Temperature", format!("{} °C", current.temperature));
    print_field("Humidity", format!("{}%", current.humidity));
    print_field("Wind", format!("{} m/s", current.wind_speed));
    print_field("Pressure", format!("{} hPa", current.pressure));

    println!("\n{}", "Drilling impact".bold());
    print_impact(impact.temperature, current.temperature > 30 || current.temperature < 10);
    print_impact(impact.humidity, current.humidity < 30);

    if let Some(days) = history {
        println!();
        print_output::<DayRow>(days.iter().map(DayRow::from).collect(), format)?;
    }

    Ok(())
}

fn print_impact(message: &str, concerning: bool) {
    if concerning {
        print_warning(message);
    } else {
        println!("  {}", message);
    }
}
