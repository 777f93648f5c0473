//! Mock weather service and drilling impact advice.
//!
//! Readings are random but bounded. A fixed seed in [`WeatherConfig`] makes
//! them reproducible.

use crate::config::WeatherConfig;
use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// Days of history returned, today included.
pub const HISTORY_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    /// Degrees Celsius.
    pub temperature: i32,
    /// Percent.
    pub humidity: u32,
    pub description: String,
    pub wind_speed: u32,
    /// hPa.
    pub pressure: u32,
    pub location: String,
}

/// One day of weather history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    pub date: NaiveDate,
    pub temperature: i32,
    pub humidity: u32,
    /// Millimeters.
    pub rainfall: u32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    #[error("weather service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather, WeatherError>;

    /// Daily readings ending today, oldest first.
    async fn history(&self, latitude: f64, longitude: f64)
        -> Result<Vec<DailyWeather>, WeatherError>;
}

/// Random readings within plausible bounds.
pub struct MockWeatherService {
    rng: Mutex<StdRng>,
    latency: Duration,
}

impl MockWeatherService {
    pub fn new(config: &WeatherConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            latency: config.simulated_latency(),
        }
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// History ending at `today`, oldest first.
    pub async fn history_ending(&self, today: NaiveDate) -> Vec<DailyWeather> {
        let mut rng = self.rng.lock().await;
        (0..HISTORY_DAYS)
            .rev()
            .filter_map(|days_ago| today.checked_sub_days(Days::new(days_ago)))
            .map(|date| DailyWeather {
                date,
                temperature: rng.gen_range(20..=35),
                humidity: rng.gen_range(40..=80),
                rainfall: rng.gen_range(0..=10),
            })
            .collect()
    }
}

#[async_trait]
impl WeatherService for MockWeatherService {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather, WeatherError> {
        self.delay().await;
        debug!(latitude, longitude, "mock current weather");

        let mut rng = self.rng.lock().await;
        Ok(CurrentWeather {
            temperature: rng.gen_range(20..=35),
            humidity: rng.gen_range(40..=80),
            description: "Partly cloudy".to_string(),
            wind_speed: rng.gen_range(0..=10),
            pressure: rng.gen_range(1000..=1050),
            location: "Current Location".to_string(),
        })
    }

    async fn history(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<DailyWeather>, WeatherError> {
        self.delay().await;
        debug!(latitude, longitude, "mock weather history");
        Ok(self.history_ending(Utc::now().date_naive()).await)
    }
}

/// Drilling advice derived from current conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherImpact {
    pub temperature: &'static str,
    pub humidity: &'static str,
}

impl WeatherImpact {
    pub fn assess(weather: &CurrentWeather) -> Self {
        let temperature = if weather.temperature > 30 {
            "High evaporation may lower water levels"
        } else if weather.temperature < 10 {
            "Cold weather may affect drilling operations"
        } else {
            "Optimal temperature for drilling operations"
        };

        let humidity = if weather.humidity > 70 {
            "High humidity indicates good groundwater conditions"
        } else if weather.humidity < 30 {
            "Low humidity may indicate dry conditions"
        } else {
            "Moderate humidity levels detected"
        };

        Self {
            temperature,
            humidity,
        }
    }
}
