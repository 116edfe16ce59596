pub mod favorites;

pub use favorites::{FavoriteCity, FavoriteId, FavoritesClient, FavoritesError, NewFavorite};
