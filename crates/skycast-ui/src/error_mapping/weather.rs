use skycast_core::{AppError, WeatherError};
use skycast_weather::WeatherError as LookupError;

use super::IntoAppError;

impl IntoAppError for LookupError {
    fn into_app_error(self) -> AppError {
        match self {
            LookupError::NotFound(city) => AppError::Weather(WeatherError::CityNotFound(city)),
            LookupError::Provider(reason) => AppError::Weather(WeatherError::ProviderError(reason)),
            LookupError::Network(e) => AppError::Weather(WeatherError::Transport(e.to_string())),
            LookupError::Parse(s) => AppError::Weather(WeatherError::Transport(s)),
        }
    }
}
