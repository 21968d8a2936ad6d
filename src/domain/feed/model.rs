use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One selectable entity: a taxonomy term, a system link, or a post.
///
/// The catalog owns these; the selector only reads them. `term_ids`
/// carries taxonomy membership for posts and stays empty for items that
/// are selected by their own ID.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CatalogItem {
    pub id: i64,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,
    #[serde(default)]
    pub term_ids: Vec<i64>,
}

impl CatalogItem {
    /// Bare item used where only the ID matters.
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            url: None,
            thumbnail_url: None,
            excerpt: None,
            published_at: None,
            item_count: None,
            term_ids: Vec::new(),
        }
    }
}

/// What to show a user who has no stored selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Show the whole catalog
    All,
    /// Show nothing; the client renders a "make a selection" prompt
    None,
    /// Show the most recent items regardless of taxonomy (feed only)
    Latest,
}

/// The selector's verdict: which items to display and why.
///
/// Derived and ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    pub items: Vec<CatalogItem>,
    pub is_personalized: bool,
    pub policy: FallbackPolicy,
}
