//! Client for the favorites service: a JSON collection of saved cities.
//!
//! `GET {base}` lists, `POST {base}` creates (the service assigns the id),
//! `DELETE {base}/{id}` removes.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// Errors that can occur talking to the favorites service.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// A favorite with this exact name already exists; nothing was written.
    #[error("{0} is already a favorite")]
    Duplicate(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Favorites service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Identifier assigned by the favorites service. Some backends hand out
/// numbers, others strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FavoriteId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FavoriteId::Number(n) => write!(f, "{}", n),
            FavoriteId::Text(s) => f.write_str(s),
        }
    }
}

/// Only canonical decimal text becomes a number, so "007" stays text.
impl From<&str> for FavoriteId {
    fn from(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(n) if n.to_string() == s => FavoriteId::Number(n),
            _ => FavoriteId::Text(s.to_string()),
        }
    }
}

/// A saved city as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteCity {
    pub id: FavoriteId,
    pub name: String,
    /// ISO-8601 instant the favorite was added
    pub timestamp: String,
}

/// Request body for creating a favorite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFavorite {
    pub name: String,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct FavoritesClient {
    client: Arc<Client>,
    base_url: String,
}

impl FavoritesClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FavoritesError> {
        let mut builder = Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// List all favorites.
    #[instrument(skip(self), level = "info")]
    pub async fn list(&self) -> Result<Vec<FavoriteCity>, FavoritesError> {
        let response = self.client.get(&self.base_url).send().await?;
        self.handle_response(response).await
    }

    /// Create a favorite unconditionally.
    #[instrument(skip(self), level = "info")]
    pub async fn create(&self, favorite: &NewFavorite) -> Result<FavoriteCity, FavoritesError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(favorite)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Add a favorite unless one with the same name exists.
    ///
    /// Reads the full list, then writes. The two steps are not atomic: two
    /// clients adding the same name at once can both pass the check.
    #[instrument(skip(self), level = "info")]
    pub async fn add(&self, favorite: &NewFavorite) -> Result<FavoriteCity, FavoritesError> {
        let existing = self.list().await?;

        if existing.iter().any(|f| f.name == favorite.name) {
            tracing::info!("{} is already a favorite, skipping create", favorite.name);
            return Err(FavoritesError::Duplicate(favorite.name.clone()));
        }

        let created = self.create(favorite).await?;
        tracing::info!("Added favorite {} ({})", created.name, created.id);
        Ok(created)
    }

    /// Delete a favorite by id.
    #[instrument(skip(self), level = "info")]
    pub async fn delete(&self, id: &FavoriteId) -> Result<(), FavoritesError> {
        let url = format!(
            "{}/{}",
            self.base_url,
            urlencoding::encode(&id.to_string())
        );

        let response = self.client.delete(&url).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(FavoritesError::Status {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, FavoritesError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| FavoritesError::Parse(format!("JSON parse error: {}", e)))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(FavoritesError::Status {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}
