//! Forecast client: current conditions plus the daily series in one request.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::codes::WeatherCode;
use crate::geocode::USER_AGENT;
use crate::types::{CurrentConditions, DailyForecastEntry, Forecast, WeatherError};

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

/// Message used when the provider fails without giving a reason.
pub const GENERIC_PROVIDER_MESSAGE: &str = "Failed to fetch weather data";

#[derive(Serialize)]
struct ForecastQuery {
    latitude: f64,
    longitude: f64,
    current: &'static str,
    daily: &'static str,
    timezone: &'static str,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    weather_code: i32,
    wind_speed_10m: f64,
}

/// Parallel arrays keyed by `time`
#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    weather_code: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    reason: Option<String>,
}

impl From<CurrentBlock> for CurrentConditions {
    fn from(c: CurrentBlock) -> Self {
        Self {
            temperature: c.temperature_2m,
            apparent_temperature: c.apparent_temperature,
            relative_humidity: c.relative_humidity_2m.round().clamp(0.0, 100.0) as u8,
            wind_speed: c.wind_speed_10m,
            weather_code: WeatherCode::from_wmo_code(c.weather_code),
        }
    }
}

impl DailyBlock {
    fn into_entries(self) -> Vec<DailyForecastEntry> {
        let len = self.time.len();
        if self.weather_code.len() != len
            || self.temperature_2m_max.len() != len
            || self.temperature_2m_min.len() != len
        {
            tracing::warn!("Daily forecast arrays differ in length, truncating to shortest");
        }

        self.time
            .into_iter()
            .zip(self.weather_code)
            .zip(self.temperature_2m_max.into_iter().zip(self.temperature_2m_min))
            .map(|((date, code), (max_temp, min_temp))| DailyForecastEntry {
                date,
                max_temp,
                min_temp,
                weather_code: WeatherCode::from_wmo_code(code),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
}

impl WeatherProvider {
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

    /// Fetch current conditions and the full daily series for a point.
    ///
    /// A non-success status is a [`WeatherError::Provider`] carrying the
    /// provider's `reason` when the body has one.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Forecast, WeatherError> {
        let query = ForecastQuery {
            latitude,
            longitude,
            current: CURRENT_FIELDS,
            daily: DAILY_FIELDS,
            timezone: "auto",
        };

        let response = self.client.get(&self.base_url).query(&query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let reason = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.reason)
                .unwrap_or_else(|| GENERIC_PROVIDER_MESSAGE.to_string());
            tracing::warn!("Weather provider returned {}: {}", status, reason);
            return Err(WeatherError::Provider(reason));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("Forecast response: {}", e)))?;

        let forecast = Forecast {
            current: body.current.into(),
            daily: body.daily.into_entries(),
        };
        tracing::debug!("Fetched forecast with {} daily entries", forecast.daily.len());
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "latitude": -1.25,
            "longitude": 36.75,
            "timezone": "Africa/Nairobi",
            "current": {
                "time": "2026-10-19T12:00",
                "interval": 900,
                "temperature_2m": 24.6,
                "relative_humidity_2m": 48,
                "apparent_temperature": 23.9,
                "weather_code": 2,
                "wind_speed_10m": 14.3
            },
            "daily": {
                "time": ["2026-10-19", "2026-10-20"],
                "weather_code": [2, 61],
                "temperature_2m_max": [25.1, 22.4],
                "temperature_2m_min": [13.2, 12.8]
            }
        })
    }

    #[test]
    fn test_parse_forecast_body() {
        let body: ForecastResponse = serde_json::from_value(sample_body()).unwrap();
        let current = CurrentConditions::from(body.current);
        assert_eq!(current.relative_humidity, 48);
        assert_eq!(current.weather_code, WeatherCode::PartlyCloudy);

        let daily = body.daily.into_entries();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert_eq!(daily[1].weather_code, WeatherCode::SlightRain);
        assert_eq!(daily[1].min_temp, 12.8);
    }

    #[test]
    fn test_mismatched_daily_arrays_truncate() {
        let daily = DailyBlock {
            time: vec![
                NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
                NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            ],
            weather_code: vec![0],
            temperature_2m_max: vec![20.0, 21.0],
            temperature_2m_min: vec![10.0, 11.0],
        };
        assert_eq!(daily.into_entries().len(), 1);
    }

    #[test]
    fn test_error_body_reason() {
        let body: ErrorBody = serde_json::from_value(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        }))
        .unwrap();
        assert_eq!(body.reason.as_deref(), Some("Latitude must be in range of -90 to 90°."));
    }
}
