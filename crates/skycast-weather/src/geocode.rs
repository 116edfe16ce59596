//! Geocoding: resolve a city name or a coordinate pair to a [`Location`].
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::types::{Location, WeatherError};

pub(crate) const USER_AGENT: &str = "Skycast/0.1.0";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<GeocodeResult> for Location {
    fn from(r: GeocodeResult) -> Self {
        Self {
            name: r.name,
            country: r.country.unwrap_or_default(),
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[derive(Serialize)]
struct NameQuery<'a> {
    name: &'a str,
    count: u8,
}

#[derive(Serialize)]
struct CoordsQuery {
    latitude: f64,
    longitude: f64,
    count: u8,
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Arc<Client>,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        // Zero means no timeout.
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.to_string(),
        })
    }

    /// Resolve free text to the single best match.
    ///
    /// Fails with [`WeatherError::NotFound`] when the provider has no match.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve_by_name(&self, city: &str) -> Result<Location, WeatherError> {
        let query = NameQuery {
            name: city,
            count: 1,
        };

        match self.first_match(&query).await? {
            Some(location) => {
                tracing::info!("Geocoded {:?} to {}", city, location.display_name());
                Ok(location)
            }
            None => Err(WeatherError::NotFound(city.to_string())),
        }
    }

    /// Resolve a coordinate pair to a place.
    ///
    /// No match is not an error: the coordinates are still good for a
    /// forecast, so this returns [`Location::fallback`] instead.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve_by_coords(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Location, WeatherError> {
        let query = CoordsQuery {
            latitude,
            longitude,
            count: 1,
        };

        match self.first_match(&query).await? {
            Some(location) => Ok(location),
            None => {
                tracing::debug!("No place found at ({}, {}), using fallback name", latitude, longitude);
                Ok(Location::fallback(latitude, longitude))
            }
        }
    }

    async fn first_match<Q: Serialize + ?Sized>(
        &self,
        query: &Q,
    ) -> Result<Option<Location>, WeatherError> {
        let response = self.client.get(&self.base_url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(WeatherError::Parse(format!(
                "Geocoding returned status {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("Geocoding response: {}", e)))?;

        Ok(body
            .results
            .and_then(|results| results.into_iter().next())
            .map(Location::from))
    }
}
