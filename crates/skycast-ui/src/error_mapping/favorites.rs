use skycast_core::{AppError, FavoritesError};
use skycast_services::FavoritesError as StoreError;

use super::IntoAppError;

impl IntoAppError for StoreError {
    fn into_app_error(self) -> AppError {
        match self {
            StoreError::Duplicate(name) => AppError::Favorites(FavoritesError::Duplicate(name)),
            StoreError::Network(e) => AppError::Favorites(FavoritesError::Transport(e.to_string())),
            StoreError::Status { status, message } => AppError::Favorites(
                FavoritesError::Transport(format!("{}: {}", status, message)),
            ),
            StoreError::Parse(s) => AppError::Favorites(FavoritesError::Transport(s)),
        }
    }
}
