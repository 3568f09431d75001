use serde::{Deserialize, Serialize};

/// A geographic point, either taken directly from user input or resolved
/// from a city name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Free-text city input, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery {
    pub name: String,
}

impl CityQuery {
    /// Trim the raw text; empty input yields no query.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self { name: trimmed.to_string() })
        }
    }
}

/// One observation of current conditions at a point. Built fresh per
/// request, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    /// Zero when the upstream response carries no precipitation field.
    pub precipitation_mm: f64,
    pub wind_speed_ms: f64,
}

/// The composed reply sentence, ready to hand to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResult {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_trims_whitespace() {
        let query = CityQuery::parse("  Berlin  ").expect("non-empty input must parse");
        assert_eq!(query.name, "Berlin");
    }

    #[test]
    fn city_query_rejects_empty_input() {
        assert_eq!(CityQuery::parse(""), None);
        assert_eq!(CityQuery::parse("   \t "), None);
    }
}
