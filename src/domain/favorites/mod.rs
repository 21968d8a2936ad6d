pub mod error;
pub mod service;

pub use error::FavoriteServiceError;
pub use service::{FavoriteService, FavoriteServiceApi};

use crate::domain::feed::DisplayItem;
use serde::{Deserialize, Serialize};

/// Request to flip one post's favorite status
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub item_id: i64,
}

/// Post-toggle state returned to the client for DOM patching
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ToggleResponse {
    pub is_favorite: bool,
    pub count: u64,
}

/// Response for the favorites listing
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub count: u64,
    pub items: Vec<DisplayItem>,
}
