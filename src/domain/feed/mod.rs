pub mod error;
pub mod model;
pub mod presentation;
pub mod selector;
pub mod service;

pub use error::FeedServiceError;
pub use model::{CatalogItem, FallbackPolicy, SelectionResult};
pub use presentation::{adapt, DisplayItem, DisplayOptions, Layout};
pub use selector::select;
pub use service::{FeedService, FeedServiceApi};

use serde::{Deserialize, Serialize};

/// Response for the feed and systems-directory endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedResponse {
    pub is_personalized: bool,
    pub policy: FallbackPolicy,
    pub items: Vec<DisplayItem>,
}

/// Query options accepted by GET /api/feed
#[derive(Debug, Clone, Deserialize)]
pub struct FeedRequest {
    pub policy: Option<FallbackPolicy>,
    pub limit: Option<usize>,
    pub show_thumbnail: Option<bool>,
    pub show_excerpt: Option<bool>,
    pub show_date: Option<bool>,
    pub layout: Option<Layout>,
}

/// Query options accepted by GET /api/systems
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryRequest {
    pub fallback: Option<FallbackPolicy>,
    pub limit: Option<usize>,
    pub show_thumbnail: Option<bool>,
    pub layout: Option<Layout>,
}
