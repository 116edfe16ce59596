use skycast_core::{AppError, LocationError};
use skycast_weather::LocationError as PositionError;

use super::IntoAppError;

impl IntoAppError for PositionError {
    fn into_app_error(self) -> AppError {
        match self {
            PositionError::Unsupported => AppError::Location(LocationError::UnsupportedCapability),
            PositionError::PermissionDenied => AppError::Location(
                LocationError::PermissionOrPosition("permission denied".into()),
            ),
            PositionError::Position(s) => AppError::Location(LocationError::PermissionOrPosition(s)),
        }
    }
}
