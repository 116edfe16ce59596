//! Weather lookup for Skycast
//!
//! Resolves city names or coordinates through the Open-Meteo geocoding API
//! and fetches current conditions plus a daily forecast for the result.

pub mod codes;
pub mod geocode;
pub mod location;
pub mod provider;
pub mod types;

pub use codes::WeatherCode;
pub use geocode::GeocodingClient;
pub use location::{FixedPosition, PositionSource};
pub use provider::WeatherProvider;
pub use types::*;
