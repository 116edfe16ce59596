//! Centralized error types for the Skycast widget.
//!
//! Every crate error converts into [`AppError`], and the error banner only shows
//! [`AppError::user_message`]. Messages vary by pipeline stage rather than by
//! precise cause, so a dropped connection and a malformed forecast body read
//! the same to the user while the logs keep the detail.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather lookup error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Geolocation error: {0}")]
    Location(#[from] LocationError),

    #[error("Favorites error: {0}")]
    Favorites(#[from] FavoritesError),

    #[error("Empty search")]
    EmptySearch,
}

impl AppError {
    /// Returns the message shown in the error banner or notice.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Location(e) => e.user_message(),
            AppError::Favorites(_) => "Favorites could not be updated.",
            AppError::EmptySearch => "Please enter a city name.",
        }
    }
}

/// Lookup pipeline errors (geocoding and forecast stages).
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather provider error: {0}")]
    ProviderError(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::CityNotFound(_) => "City not found. Please try again.",
            WeatherError::ProviderError(_) | WeatherError::Transport(_) => {
                "Failed to fetch weather data. Please try again later."
            }
        }
    }
}

/// Device position errors.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Geolocation is not supported")]
    UnsupportedCapability,

    #[error("Position unavailable: {0}")]
    PermissionOrPosition(String),
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::UnsupportedCapability => "Geolocation is not supported on this device.",
            LocationError::PermissionOrPosition(_) => {
                "Unable to retrieve your location. Please search for a city instead."
            }
        }
    }
}

/// Favorites store errors. These never reach the error banner; the
/// duplicate notice is its `Display` text.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("{0} is already in your favorites.")]
    Duplicate(String),

    #[error("Transport error: {0}")]
    Transport(String),
}
