//! Device position capability used by the geolocate action.

use async_trait::async_trait;

use crate::types::{Coordinates, LocationError};

/// Source of the device's current position.
///
/// A widget without any source has no geolocation capability at all; a
/// source that exists but cannot produce a position returns
/// [`LocationError::PermissionDenied`] or [`LocationError::Position`].
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position fixed at construction, e.g. from the config file.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    coordinates: Coordinates,
}

impl FixedPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: Coordinates::new(latitude, longitude),
        }
    }
}

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        if !(-90.0..=90.0).contains(&self.coordinates.latitude)
            || !(-180.0..=180.0).contains(&self.coordinates.longitude)
        {
            return Err(LocationError::Position(format!(
                "invalid coordinates ({}, {})",
                self.coordinates.latitude, self.coordinates.longitude
            )));
        }
        Ok(self.coordinates)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[tokio::test]
    async fn test_fixed_position() {
        let source = FixedPosition::new(-1.2921, 36.8219);
        let pos = source.current_position().await.unwrap();
        assert_eq!(pos, Coordinates::new(-1.2921, 36.8219));
    }

    #[tokio::test]
    async fn test_fixed_position_out_of_range() {
        let source = FixedPosition::new(120.0, 0.0);
        assert!(matches!(
            source.current_position().await,
            Err(LocationError::Position(_))
        ));
    }
}
