use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::ResolutionFailure;
use crate::model::{Coordinates, WeatherSnapshot};

pub const FORECAST_API_BASE: &str = "https://api.open-meteo.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches current conditions for a coordinate pair from the Open-Meteo
/// forecast API. Same timeout and no-retry policy as the geocoding client.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(FORECAST_API_BASE.to_string())
    }

    /// Point the client at a different endpoint, e.g. a test server.
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for weather")?;

        Ok(Self { base_url, http })
    }

    pub async fn fetch(&self, coords: &Coordinates) -> Result<WeatherSnapshot, ResolutionFailure> {
        let url = format!("{}/forecast", self.base_url);

        debug!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            "fetching current weather"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ResolutionFailure::upstream(format!("weather request failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            ResolutionFailure::upstream(format!("failed to read weather response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(ResolutionFailure::upstream(format!(
                "weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            ResolutionFailure::malformed(format!("failed to parse weather JSON: {e}"))
        })?;

        let current = parsed.current_weather.ok_or_else(|| {
            ResolutionFailure::malformed("weather response missing current_weather".to_string())
        })?;

        Ok(WeatherSnapshot {
            temperature_c: current.temperature,
            // Absent means "no precipitation reported", not "unknown".
            precipitation_mm: current.precipitation.unwrap_or(0.0),
            wind_speed_ms: current.windspeed,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    precipitation: Option<f64>,
}

// Char-based so a cut inside a multibyte body cannot panic.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    let truncated: String = body.chars().take(MAX).collect();
    if truncated.len() < body.len() { format!("{truncated}...") } else { truncated }
}
