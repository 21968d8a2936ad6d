use super::error::FeedServiceError;
use super::model::FallbackPolicy;
use super::presentation::{adapt, DisplayOptions, Layout};
use super::selector::select;
use super::{DirectoryRequest, FeedRequest, FeedResponse};
use crate::domain::preferences::PreferenceCategory;
use crate::infrastructure::repositories::{CatalogRepository, PostFilter, PreferenceRepository};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

pub struct FeedService {
    preference_repo: Arc<dyn PreferenceRepository>,
    catalog_repo: Arc<dyn CatalogRepository>,
    default_limit: usize,
}

impl FeedService {
    pub fn new(
        preference_repo: Arc<dyn PreferenceRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
        default_limit: usize,
    ) -> Self {
        Self {
            preference_repo,
            catalog_repo,
            default_limit,
        }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    /// Personalized news feed. Anonymous visitors read with an empty
    /// preference set and get the fallback policy instead of an error.
    async fn news_feed(
        &self,
        user_id: Option<Uuid>,
        request: FeedRequest,
    ) -> Result<FeedResponse, FeedServiceError>;

    /// Curated systems directory, filtered to the user's pinned systems.
    async fn systems_directory(
        &self,
        user_id: Option<Uuid>,
        request: DirectoryRequest,
    ) -> Result<FeedResponse, FeedServiceError>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    async fn news_feed(
        &self,
        user_id: Option<Uuid>,
        request: FeedRequest,
    ) -> Result<FeedResponse, FeedServiceError> {
        let preferences = self
            .stored_preferences(user_id, PreferenceCategory::NewsCategories)
            .await?;

        let policy = request.policy.unwrap_or(FallbackPolicy::All);
        let limit = request.limit.unwrap_or(self.default_limit);

        // A personalized read filters in process and needs the full
        // window; fallback reads can push the cap into the query since
        // posts already come back newest first.
        let filter = if preferences.is_empty() {
            PostFilter {
                limit: Some(limit as i64),
            }
        } else {
            PostFilter::default()
        };

        let catalog = self
            .catalog_repo
            .list_posts(&filter)
            .await
            .map_err(|e| FeedServiceError::Dependency(e.to_string()))?;

        let selection = select(&preferences, &catalog, policy, Some(limit));

        tracing::debug!(
            user_id = ?user_id,
            policy = ?policy,
            is_personalized = selection.is_personalized,
            item_count = selection.items.len(),
            "News feed selected"
        );

        let options = DisplayOptions {
            limit: Some(limit),
            show_thumbnail: request.show_thumbnail.unwrap_or(true),
            show_excerpt: request.show_excerpt.unwrap_or(true),
            show_date: request.show_date.unwrap_or(true),
            layout: request.layout.unwrap_or(Layout::List),
        };

        Ok(FeedResponse {
            is_personalized: selection.is_personalized,
            policy: selection.policy,
            items: adapt(&selection, &options),
        })
    }

    async fn systems_directory(
        &self,
        user_id: Option<Uuid>,
        request: DirectoryRequest,
    ) -> Result<FeedResponse, FeedServiceError> {
        let preferences = self
            .stored_preferences(user_id, PreferenceCategory::SelectedSystems)
            .await?;

        let catalog = self
            .catalog_repo
            .list_systems()
            .await
            .map_err(|e| FeedServiceError::Dependency(e.to_string()))?;

        // Systems default to an explicit opt-in: no selection, no links.
        let policy = request.fallback.unwrap_or(FallbackPolicy::None);

        let selection = select(&preferences, &catalog, policy, request.limit);

        let options = DisplayOptions {
            limit: request.limit,
            show_thumbnail: request.show_thumbnail.unwrap_or(true),
            show_excerpt: false,
            show_date: false,
            layout: request.layout.unwrap_or(Layout::Grid),
        };

        Ok(FeedResponse {
            is_personalized: selection.is_personalized,
            policy: selection.policy,
            items: adapt(&selection, &options),
        })
    }
}

impl FeedService {
    async fn stored_preferences(
        &self,
        user_id: Option<Uuid>,
        category: PreferenceCategory,
    ) -> Result<BTreeSet<i64>, FeedServiceError> {
        match user_id {
            Some(user_id) => self
                .preference_repo
                .get(user_id, category)
                .await
                .map_err(|e| FeedServiceError::Dependency(e.to_string())),
            None => Ok(BTreeSet::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed::CatalogItem;
    use crate::error::AppResult;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct InMemoryPreferences {
        sets: Mutex<HashMap<(Uuid, PreferenceCategory), BTreeSet<i64>>>,
    }

    impl InMemoryPreferences {
        fn with(user_id: Uuid, category: PreferenceCategory, ids: &[i64]) -> Self {
            let mut sets = HashMap::new();
            sets.insert((user_id, category), ids.iter().copied().collect());
            Self {
                sets: Mutex::new(sets),
            }
        }

        fn empty() -> Self {
            Self {
                sets: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl PreferenceRepository for InMemoryPreferences {
        async fn get(
            &self,
            user_id: Uuid,
            category: PreferenceCategory,
        ) -> AppResult<BTreeSet<i64>> {
            let sets = self.sets.lock().unwrap();
            Ok(sets.get(&(user_id, category)).cloned().unwrap_or_default())
        }

        async fn replace(
            &self,
            user_id: Uuid,
            category: PreferenceCategory,
            values: &BTreeSet<i64>,
        ) -> AppResult<()> {
            let mut sets = self.sets.lock().unwrap();
            sets.insert((user_id, category), values.clone());
            Ok(())
        }

        async fn toggle(
            &self,
            user_id: Uuid,
            category: PreferenceCategory,
            item_id: i64,
        ) -> AppResult<(bool, u64)> {
            let mut sets = self.sets.lock().unwrap();
            let set = sets.entry((user_id, category)).or_default();
            let is_member =
                crate::infrastructure::repositories::preference_repository::apply_toggle(
                    set, item_id,
                );
            Ok((is_member, set.len() as u64))
        }
    }

    struct FixedCatalog {
        posts: Vec<CatalogItem>,
        systems: Vec<CatalogItem>,
        seen_post_limit: Mutex<Option<Option<i64>>>,
    }

    impl FixedCatalog {
        fn new(posts: Vec<CatalogItem>, systems: Vec<CatalogItem>) -> Self {
            Self {
                posts,
                systems,
                seen_post_limit: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CatalogRepository for FixedCatalog {
        async fn list_categories(&self) -> AppResult<Vec<CatalogItem>> {
            Ok(Vec::new())
        }

        async fn list_systems(&self) -> AppResult<Vec<CatalogItem>> {
            Ok(self.systems.clone())
        }

        async fn list_posts(&self, filter: &PostFilter) -> AppResult<Vec<CatalogItem>> {
            *self.seen_post_limit.lock().unwrap() = Some(filter.limit);
            let mut posts = self.posts.clone();
            if let Some(limit) = filter.limit {
                posts.truncate(limit as usize);
            }
            Ok(posts)
        }
    }

    fn post(id: i64, terms: &[i64], day: u32) -> CatalogItem {
        let mut item = CatalogItem::new(id, format!("Post {}", id));
        item.term_ids = terms.to_vec();
        item.published_at = Some(Utc.with_ymd_and_hms(2026, 6, day, 12, 0, 0).unwrap());
        item
    }

    fn feed_request() -> FeedRequest {
        FeedRequest {
            policy: None,
            limit: None,
            show_thumbnail: None,
            show_excerpt: None,
            show_date: None,
            layout: None,
        }
    }

    #[tokio::test]
    async fn test_feed_filters_posts_by_selected_categories() {
        let user_id = Uuid::new_v4();
        let prefs = InMemoryPreferences::with(
            user_id,
            PreferenceCategory::NewsCategories,
            &[10],
        );
        let catalog = FixedCatalog::new(
            vec![post(1, &[10], 3), post(2, &[20], 2), post(3, &[10, 20], 1)],
            Vec::new(),
        );
        let service = FeedService::new(Arc::new(prefs), Arc::new(catalog), 10);

        let response = service
            .news_feed(Some(user_id), feed_request())
            .await
            .unwrap();

        assert!(response.is_personalized);
        let ids: Vec<i64> = response.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_anonymous_feed_degrades_to_fallback() {
        let prefs = InMemoryPreferences::empty();
        let catalog = FixedCatalog::new(vec![post(1, &[10], 3), post(2, &[20], 2)], Vec::new());
        let service = FeedService::new(Arc::new(prefs), Arc::new(catalog), 10);

        let response = service.news_feed(None, feed_request()).await.unwrap();

        assert!(!response.is_personalized);
        assert_eq!(response.items.len(), 2);
    }

    #[tokio::test]
    async fn test_feed_applies_default_limit() {
        let prefs = InMemoryPreferences::empty();
        let posts = (1..=8).map(|id| post(id, &[1], 1)).collect();
        let catalog = FixedCatalog::new(posts, Vec::new());
        let service = FeedService::new(Arc::new(prefs), Arc::new(catalog), 5);

        let response = service.news_feed(None, feed_request()).await.unwrap();

        assert_eq!(response.items.len(), 5);
    }

    #[tokio::test]
    async fn test_fallback_feed_pushes_limit_into_query() {
        let prefs = InMemoryPreferences::empty();
        let posts = (1..=8).map(|id| post(id, &[1], 1)).collect();
        let catalog = Arc::new(FixedCatalog::new(posts, Vec::new()));
        let service = FeedService::new(Arc::new(prefs), catalog.clone(), 5);

        service.news_feed(None, feed_request()).await.unwrap();

        assert_eq!(*catalog.seen_post_limit.lock().unwrap(), Some(Some(5)));
    }

    #[tokio::test]
    async fn test_personalized_feed_fetches_the_full_window() {
        let user_id = Uuid::new_v4();
        let prefs = InMemoryPreferences::with(
            user_id,
            PreferenceCategory::NewsCategories,
            &[10],
        );
        let catalog = Arc::new(FixedCatalog::new(
            vec![post(1, &[20], 3), post(2, &[10], 2)],
            Vec::new(),
        ));
        let service = FeedService::new(Arc::new(prefs), catalog.clone(), 1);

        let response = service
            .news_feed(Some(user_id), feed_request())
            .await
            .unwrap();

        // The matching post sits past the page size; a pre-filter LIMIT
        // would have cut it off.
        assert_eq!(*catalog.seen_post_limit.lock().unwrap(), Some(None));
        let ids: Vec<i64> = response.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_systems_directory_defaults_to_none_fallback() {
        let user_id = Uuid::new_v4();
        let prefs = InMemoryPreferences::empty();
        let catalog = FixedCatalog::new(
            Vec::new(),
            vec![CatalogItem::new(1, "Payroll"), CatalogItem::new(2, "Helpdesk")],
        );
        let service = FeedService::new(Arc::new(prefs), Arc::new(catalog), 10);

        let response = service
            .systems_directory(
                Some(user_id),
                DirectoryRequest {
                    fallback: None,
                    limit: None,
                    show_thumbnail: None,
                    layout: None,
                },
            )
            .await
            .unwrap();

        assert!(!response.is_personalized);
        assert!(response.items.is_empty());
        assert_eq!(response.policy, FallbackPolicy::None);
    }

    #[tokio::test]
    async fn test_systems_directory_filters_to_pinned_systems() {
        let user_id = Uuid::new_v4();
        let prefs = InMemoryPreferences::with(
            user_id,
            PreferenceCategory::SelectedSystems,
            &[2, 99],
        );
        let catalog = FixedCatalog::new(
            Vec::new(),
            vec![CatalogItem::new(1, "Payroll"), CatalogItem::new(2, "Helpdesk")],
        );
        let service = FeedService::new(Arc::new(prefs), Arc::new(catalog), 10);

        let response = service
            .systems_directory(
                Some(user_id),
                DirectoryRequest {
                    fallback: None,
                    limit: None,
                    show_thumbnail: None,
                    layout: None,
                },
            )
            .await
            .unwrap();

        assert!(response.is_personalized);
        let ids: Vec<i64> = response.items.iter().map(|i| i.id).collect();
        // 99 no longer exists in the catalog and is dropped silently
        assert_eq!(ids, vec![2]);
    }
}
