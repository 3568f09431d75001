use tracing::info;

use crate::{
    advice::AdviceStrategy,
    error::ResolutionFailure,
    geocode::GeocodingClient,
    model::{AdviceResult, CityQuery, Coordinates, WeatherSnapshot},
    weather::WeatherClient,
};

/// What the transport layer hands us: a tagged union, resolved once at the
/// boundary instead of by runtime type inspection downstream.
#[derive(Debug, Clone)]
pub enum RequestInput {
    Coordinates(Coordinates),
    City(CityQuery),
}

/// Orchestrates resolve → fetch → advise for one user interaction.
///
/// No caching and no retries: identical inputs in immediate succession
/// re-issue both external calls. Failures from either client propagate
/// unchanged.
pub struct RequestPipeline {
    geocoder: GeocodingClient,
    weather: WeatherClient,
    strategy: Box<dyn AdviceStrategy>,
}

impl RequestPipeline {
    pub fn new(
        geocoder: GeocodingClient,
        weather: WeatherClient,
        strategy: Box<dyn AdviceStrategy>,
    ) -> Self {
        Self { geocoder, weather, strategy }
    }

    pub async fn handle(&self, input: RequestInput) -> Result<AdviceResult, ResolutionFailure> {
        match input {
            RequestInput::Coordinates(coords) => {
                let snapshot = self.weather.fetch(&coords).await?;
                self.reply(None, &snapshot).await
            }
            RequestInput::City(query) => {
                let coords = self.geocoder.resolve(&query).await?;
                info!(city = %query.name, latitude = coords.latitude, longitude = coords.longitude, "city resolved");

                let snapshot = self.weather.fetch(&coords).await?;
                self.reply(Some(&query.name), &snapshot).await
            }
        }
    }

    async fn reply(
        &self,
        city: Option<&str>,
        snapshot: &WeatherSnapshot,
    ) -> Result<AdviceResult, ResolutionFailure> {
        let advice = self.strategy.advise(snapshot).await?;

        let text = match city {
            Some(name) => format!(
                "In {} it's {}°C now, precipitation {} mm, wind {} m/s - {}",
                name,
                snapshot.temperature_c,
                snapshot.precipitation_mm,
                snapshot.wind_speed_ms,
                advice.text,
            ),
            None => format!(
                "It's {}°C now, precipitation {} mm, wind {} m/s - {}",
                snapshot.temperature_c,
                snapshot.precipitation_mm,
                snapshot.wind_speed_ms,
                advice.text,
            ),
        };

        Ok(AdviceResult { text })
    }
}
