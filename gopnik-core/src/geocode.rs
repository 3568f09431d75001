use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::ResolutionFailure;
use crate::model::{CityQuery, Coordinates};

pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves free-text city names to coordinates via the Open-Meteo
/// geocoding API. One attempt per call, bounded by `REQUEST_TIMEOUT`.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    base_url: String,
    http: Client,
}

impl GeocodingClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(GEOCODING_API_BASE.to_string())
    }

    /// Point the client at a different endpoint, e.g. a test server.
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for geocoding")?;

        Ok(Self { base_url, http })
    }

    /// Look up the single best match for `query`. Only the first result is
    /// used; multiple candidates are not disambiguated.
    pub async fn resolve(&self, query: &CityQuery) -> Result<Coordinates, ResolutionFailure> {
        let url = format!("{}/search", self.base_url);

        debug!(city = %query.name, "resolving city to coordinates");

        let res = self
            .http
            .get(&url)
            .query(&[("name", query.name.as_str()), ("count", "1"), ("language", "en")])
            .send()
            .await
            .map_err(|e| ResolutionFailure::upstream(format!("geocoding request failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            ResolutionFailure::upstream(format!("failed to read geocoding response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(ResolutionFailure::upstream(format!(
                "geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: GeoSearchResponse = serde_json::from_str(&body).map_err(|e| {
            ResolutionFailure::malformed(format!("failed to parse geocoding JSON: {e}"))
        })?;

        let first = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(ResolutionFailure::CityNotFound)?;

        Ok(Coordinates { latitude: first.latitude, longitude: first.longitude })
    }
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    /// Absent entirely when nothing matched.
    results: Option<Vec<GeoSearchResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchResult {
    latitude: f64,
    longitude: f64,
}

// Char-based so a cut inside a multibyte body cannot panic.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    let truncated: String = body.chars().take(MAX).collect();
    if truncated.len() < body.len() { format!("{truncated}...") } else { truncated }
}
