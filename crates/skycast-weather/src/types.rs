use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codes::WeatherCode;

/// Name used when a coordinate lookup has no matching place.
pub const FALLBACK_LOCATION_NAME: &str = "Your Location";

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Canonical place produced by geocoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// Empty when the provider did not report one
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Stand-in for a coordinate lookup that matched nothing.
    pub fn fallback(latitude: f64, longitude: f64) -> Self {
        Self {
            name: FALLBACK_LOCATION_NAME.to_string(),
            country: String::new(),
            latitude,
            longitude,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// "City, Country", or just the city when no country is known.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Current weather conditions, metric units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// °C
    pub temperature: f64,
    /// °C
    pub apparent_temperature: f64,
    /// Percent
    pub relative_humidity: u8,
    /// km/h
    pub wind_speed: f64,
    pub weather_code: WeatherCode,
}

/// One day of the daily forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    pub weather_code: WeatherCode,
}

/// Result of one forecast request. `daily` is the full provider series;
/// consumers decide how many days to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecastEntry>,
}

/// Device position errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not supported")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Position unavailable: {0}")]
    Position(String),
}

/// Geocoding and forecast errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("No geocoding match for {0:?}")]
    NotFound(String),
    #[error("Provider reported failure: {0}")]
    Provider(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// Network and parse failures are both transport errors to the caller.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_with_country() {
        let loc = Location {
            name: "Nairobi".to_string(),
            country: "Kenya".to_string(),
            latitude: -1.28333,
            longitude: 36.81667,
        };
        assert_eq!(loc.display_name(), "Nairobi, Kenya");
    }

    #[test]
    fn test_fallback_location() {
        let loc = Location::fallback(10.5, -3.25);
        assert_eq!(loc.name, "Your Location");
        assert!(loc.country.is_empty());
        assert_eq!(loc.display_name(), "Your Location");
        assert_eq!(loc.coordinates(), Coordinates::new(10.5, -3.25));
    }

    #[test]
    fn test_transport_classification() {
        assert!(WeatherError::Parse("eof".into()).is_transport());
        assert!(!WeatherError::NotFound("Atlantis".into()).is_transport());
        assert!(!WeatherError::Provider("bad".into()).is_transport());
    }
}
