use crate::domain::feed::CatalogItem;
use crate::error::AppResult;
use async_trait::async_trait;

/// Options for listing content posts.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Cap the number of rows fetched; `None` fetches everything.
    pub limit: Option<i64>,
}

/// Read-only access to the universe of selectable items.
///
/// Implementations must return deterministic orderings (name/title
/// ascending for categories and systems, newest first for posts) and an
/// empty list rather than an error when nothing matches.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// News taxonomy terms, name ascending, with per-term post counts.
    async fn list_categories(&self) -> AppResult<Vec<CatalogItem>>;

    /// Published system links, title ascending.
    async fn list_systems(&self) -> AppResult<Vec<CatalogItem>>;

    /// Published posts, newest first.
    async fn list_posts(&self, filter: &PostFilter) -> AppResult<Vec<CatalogItem>>;
}
