//! Orchestrator: wires user actions to the lookup pipeline and the
//! favorites store.
//!
//! A lookup pipeline is strictly sequential (resolve location, fetch
//! forecast, render) and any failing stage ends it with one banner message.
//! Pipelines may overlap; each takes a ticket from a generation counter when
//! it starts and only the most recently started one is allowed to render.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use skycast_core::{AppError, Config, FavoritesError};
use skycast_services::{FavoriteId, FavoritesClient, NewFavorite};
use skycast_weather::{
    FixedPosition, Forecast, GeocodingClient, Location, LocationError, PositionSource,
    WeatherProvider,
};

use crate::error_mapping::IntoAppError;
use crate::render::{render_weather, WeatherView};

/// Something the user did.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Search button with the current input text.
    Search(String),
    /// Key pressed in the search input; only Enter searches.
    KeyPress { key: String, input: String },
    Geolocate,
    PageLoad,
    AddCurrentToFavorites,
    LoadFavorite(String),
    DeleteFavorite(FavoriteId),
}

/// How a lookup pipeline ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Weather was rendered.
    Rendered,
    /// An error message was shown.
    Failed,
    /// A newer lookup started before this one finished; nothing was shown.
    Superseded,
}

enum LookupTarget {
    City(String),
    Device,
}

/// Favorite name derived from the displayed location heading: the text
/// before the first comma. A city name that itself contains a comma is cut
/// short.
pub fn favorite_name_from_display(display: &str) -> String {
    display
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

pub struct WeatherWidget {
    geocoder: GeocodingClient,
    provider: WeatherProvider,
    favorites: FavoritesClient,
    position: Option<Arc<dyn PositionSource>>,
    view: Arc<dyn WeatherView>,
    default_city: String,
    generation: AtomicU64,
}

impl WeatherWidget {
    pub fn new(
        geocoder: GeocodingClient,
        provider: WeatherProvider,
        favorites: FavoritesClient,
        view: Arc<dyn WeatherView>,
        default_city: impl Into<String>,
    ) -> Self {
        Self {
            geocoder,
            provider,
            favorites,
            position: None,
            view,
            default_city: default_city.into(),
            generation: AtomicU64::new(0),
        }
    }

    /// Give the widget a geolocation capability.
    pub fn with_position_source(mut self, source: Arc<dyn PositionSource>) -> Self {
        self.position = Some(source);
        self
    }

    /// Build the clients from config. The device position comes from the
    /// `location` section; without it geolocation is unsupported.
    pub fn from_config(config: &Config, view: Arc<dyn WeatherView>) -> Result<Self, AppError> {
        let timeout = Duration::from_secs(config.endpoints.request_timeout_secs);

        let geocoder = GeocodingClient::new(&config.endpoints.geocoding_url, timeout)
            .map_err(IntoAppError::into_app_error)?;
        let provider = WeatherProvider::new(&config.endpoints.weather_url, timeout)
            .map_err(IntoAppError::into_app_error)?;
        let favorites = FavoritesClient::new(&config.endpoints.favorites_url, timeout)
            .map_err(IntoAppError::into_app_error)?;

        let widget = Self::new(
            geocoder,
            provider,
            favorites,
            view,
            config.widget.default_city.clone(),
        );

        Ok(match config.location.position() {
            Some((lat, lon)) => widget.with_position_source(Arc::new(FixedPosition::new(lat, lon))),
            None => widget,
        })
    }

    /// Route a user action to its handler.
    pub async fn dispatch(&self, action: UserAction) {
        tracing::debug!("Dispatching {:?}", action);
        match action {
            UserAction::Search(input) => {
                self.search(&input).await;
            }
            UserAction::KeyPress { key, input } => {
                if key == "Enter" {
                    self.search(&input).await;
                }
            }
            UserAction::Geolocate => {
                self.geolocate().await;
            }
            UserAction::PageLoad => self.page_load().await,
            UserAction::AddCurrentToFavorites => self.add_current_to_favorites().await,
            UserAction::LoadFavorite(name) => {
                self.load_favorite(&name).await;
            }
            UserAction::DeleteFavorite(id) => self.delete_favorite(&id).await,
        }
    }

    /// Search for the trimmed input. Empty input shows a message and makes
    /// no request, but still supersedes any lookup in flight.
    pub async fn search(&self, input: &str) -> LookupOutcome {
        let city = input.trim();
        if city.is_empty() {
            self.start_ticket();
            self.view.set_error(AppError::EmptySearch.user_message());
            return LookupOutcome::Failed;
        }
        self.lookup(LookupTarget::City(city.to_string())).await
    }

    /// Look up weather at the device position.
    pub async fn geolocate(&self) -> LookupOutcome {
        self.lookup(LookupTarget::Device).await
    }

    /// Re-run the lookup for a saved favorite.
    pub async fn load_favorite(&self, name: &str) -> LookupOutcome {
        self.search(name).await
    }

    /// Default city lookup and favorites list, independently.
    pub async fn page_load(&self) {
        let (outcome, _) = tokio::join!(
            self.lookup(LookupTarget::City(self.default_city.clone())),
            self.refresh_favorites()
        );
        tracing::info!("Page load finished: {:?}", outcome);
    }

    fn start_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn lookup(&self, target: LookupTarget) -> LookupOutcome {
        let ticket = self.start_ticket();
        let result = self.run_pipeline(target).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Dropping result of superseded lookup #{}", ticket);
            return LookupOutcome::Superseded;
        }

        match result {
            Ok((location, forecast)) => {
                render_weather(self.view.as_ref(), &location, &forecast);
                LookupOutcome::Rendered
            }
            Err(e) => {
                tracing::error!("Lookup #{} failed: {}", ticket, e);
                self.view.set_error(e.user_message());
                LookupOutcome::Failed
            }
        }
    }

    async fn run_pipeline(&self, target: LookupTarget) -> Result<(Location, Forecast), AppError> {
        let location = match target {
            LookupTarget::City(city) => self
                .geocoder
                .resolve_by_name(&city)
                .await
                .map_err(IntoAppError::into_app_error)?,
            LookupTarget::Device => {
                let source = self
                    .position
                    .as_ref()
                    .ok_or(LocationError::Unsupported)
                    .map_err(IntoAppError::into_app_error)?;
                let position = source
                    .current_position()
                    .await
                    .map_err(IntoAppError::into_app_error)?;
                self.geocoder
                    .resolve_by_coords(position.latitude, position.longitude)
                    .await
                    .map_err(IntoAppError::into_app_error)?
            }
        };

        let forecast = self
            .provider
            .fetch_conditions(location.latitude, location.longitude)
            .await
            .map_err(IntoAppError::into_app_error)?;

        Ok((location, forecast))
    }

    /// Reload the favorites list. Failures are logged and leave the list as is.
    pub async fn refresh_favorites(&self) -> bool {
        match self.favorites.list().await {
            Ok(favorites) => {
                self.view.set_favorites(&favorites);
                true
            }
            Err(e) => {
                tracing::error!("Failed to load favorites: {}", e.into_app_error());
                false
            }
        }
    }

    /// Save the city currently shown in the heading.
    pub async fn add_current_to_favorites(&self) {
        let Some(heading) = self.view.location_text() else {
            tracing::warn!("No location displayed, nothing to add to favorites");
            return;
        };

        let name = favorite_name_from_display(&heading);
        if name.is_empty() {
            tracing::warn!("Displayed location {:?} has no city name", heading);
            return;
        }

        let favorite = NewFavorite {
            name,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        match self.favorites.add(&favorite).await.map_err(IntoAppError::into_app_error) {
            Ok(_) => {
                self.refresh_favorites().await;
            }
            Err(AppError::Favorites(notice @ FavoritesError::Duplicate(_))) => {
                self.view.notify(&notice.to_string());
            }
            Err(e) => tracing::error!("Failed to add favorite: {}", e),
        }
    }

    pub async fn delete_favorite(&self, id: &FavoriteId) {
        match self.favorites.delete(id).await {
            Ok(()) => {
                self.refresh_favorites().await;
            }
            Err(e) => tracing::error!("Failed to delete favorite {}: {}", id, e.into_app_error()),
        }
    }
}
