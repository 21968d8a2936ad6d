use super::error::FavoriteServiceError;
use super::{FavoritesResponse, ToggleResponse};
use crate::domain::feed::{adapt, select, DisplayOptions, FallbackPolicy};
use crate::domain::preferences::PreferenceCategory;
use crate::infrastructure::repositories::{CatalogRepository, PostFilter, PreferenceRepository};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct FavoriteService {
    preference_repo: Arc<dyn PreferenceRepository>,
    catalog_repo: Arc<dyn CatalogRepository>,
}

impl FavoriteService {
    pub fn new(
        preference_repo: Arc<dyn PreferenceRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self {
            preference_repo,
            catalog_repo,
        }
    }
}

#[async_trait]
pub trait FavoriteServiceApi: Send + Sync {
    /// Flip membership for one post. Self-inverse: toggling twice
    /// restores the original state. The count is always the post-toggle
    /// cardinality of the stored set, never a separately kept number.
    async fn toggle(
        &self,
        user_id: Uuid,
        item_id: i64,
    ) -> Result<ToggleResponse, FavoriteServiceError>;

    /// Membership check without mutation.
    async fn is_favorite(&self, user_id: Uuid, item_id: i64)
        -> Result<bool, FavoriteServiceError>;

    /// The user's favorites intersected with the current post catalog,
    /// shaped for display. Favorited posts that were deleted since
    /// simply disappear from the listing.
    async fn list(
        &self,
        user_id: Uuid,
        options: DisplayOptions,
    ) -> Result<FavoritesResponse, FavoriteServiceError>;
}

#[async_trait]
impl FavoriteServiceApi for FavoriteService {
    async fn toggle(
        &self,
        user_id: Uuid,
        item_id: i64,
    ) -> Result<ToggleResponse, FavoriteServiceError> {
        if item_id <= 0 {
            return Err(FavoriteServiceError::Invalid(format!(
                "item_id must be positive, got {}",
                item_id
            )));
        }

        let (is_favorite, count) = self
            .preference_repo
            .toggle(user_id, PreferenceCategory::FavoritePosts, item_id)
            .await
            .map_err(|e| FavoriteServiceError::Dependency(e.to_string()))?;

        tracing::debug!(
            user_id = %user_id,
            item_id,
            is_favorite,
            count,
            "Favorite toggled"
        );

        Ok(ToggleResponse { is_favorite, count })
    }

    async fn is_favorite(
        &self,
        user_id: Uuid,
        item_id: i64,
    ) -> Result<bool, FavoriteServiceError> {
        let favorites = self
            .preference_repo
            .get(user_id, PreferenceCategory::FavoritePosts)
            .await
            .map_err(|e| FavoriteServiceError::Dependency(e.to_string()))?;

        Ok(favorites.contains(&item_id))
    }

    async fn list(
        &self,
        user_id: Uuid,
        options: DisplayOptions,
    ) -> Result<FavoritesResponse, FavoriteServiceError> {
        let favorites = self
            .preference_repo
            .get(user_id, PreferenceCategory::FavoritePosts)
            .await
            .map_err(|e| FavoriteServiceError::Dependency(e.to_string()))?;

        let catalog = self
            .catalog_repo
            .list_posts(&PostFilter::default())
            .await
            .map_err(|e| FavoriteServiceError::Dependency(e.to_string()))?;

        // Count reflects the stored set; the listing reflects what still
        // exists in the catalog.
        let count = favorites.len() as u64;
        let selection = select(&favorites, &catalog, FallbackPolicy::None, None);

        Ok(FavoritesResponse {
            count,
            items: adapt(&selection, &options),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed::CatalogItem;
    use crate::error::AppResult;
    use std::collections::{BTreeSet, HashMap};
    use std::sync::Mutex;

    struct InMemoryPreferences {
        sets: Mutex<HashMap<(Uuid, PreferenceCategory), BTreeSet<i64>>>,
    }

    impl InMemoryPreferences {
        fn new() -> Self {
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

        // The mutex serializes the whole read-modify-write, matching the
        // row-lock discipline of the Postgres implementation.
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
    }

    #[async_trait]
    impl CatalogRepository for FixedCatalog {
        async fn list_categories(&self) -> AppResult<Vec<CatalogItem>> {
            Ok(Vec::new())
        }

        async fn list_systems(&self) -> AppResult<Vec<CatalogItem>> {
            Ok(Vec::new())
        }

        async fn list_posts(&self, _filter: &PostFilter) -> AppResult<Vec<CatalogItem>> {
            Ok(self.posts.clone())
        }
    }

    fn service_with_posts(ids: &[i64]) -> FavoriteService {
        let posts = ids
            .iter()
            .map(|id| CatalogItem::new(*id, format!("Post {}", id)))
            .collect();
        FavoriteService::new(
            Arc::new(InMemoryPreferences::new()),
            Arc::new(FixedCatalog { posts }),
        )
    }

    #[tokio::test]
    async fn test_sequential_toggles_converge() {
        let service = service_with_posts(&[10, 11]);
        let user_id = Uuid::new_v4();

        // [10, 11, 10] leaves only 11 favorited
        let first = service.toggle(user_id, 10).await.unwrap();
        assert_eq!(
            first,
            ToggleResponse {
                is_favorite: true,
                count: 1
            }
        );

        let second = service.toggle(user_id, 11).await.unwrap();
        assert_eq!(
            second,
            ToggleResponse {
                is_favorite: true,
                count: 2
            }
        );

        let third = service.toggle(user_id, 10).await.unwrap();
        assert_eq!(
            third,
            ToggleResponse {
                is_favorite: false,
                count: 1
            }
        );

        assert!(!service.is_favorite(user_id, 10).await.unwrap());
        assert!(service.is_favorite(user_id, 11).await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_is_self_inverse() {
        let service = service_with_posts(&[7]);
        let user_id = Uuid::new_v4();

        let before = service.is_favorite(user_id, 7).await.unwrap();
        service.toggle(user_id, 7).await.unwrap();
        let after = service.toggle(user_id, 7).await.unwrap();

        assert_eq!(after.is_favorite, before);
        assert_eq!(after.count, 0);
    }

    #[tokio::test]
    async fn test_toggle_rejects_non_positive_ids() {
        let service = service_with_posts(&[]);
        let user_id = Uuid::new_v4();

        assert!(matches!(
            service.toggle(user_id, 0).await,
            Err(FavoriteServiceError::Invalid(_))
        ));
        assert!(matches!(
            service.toggle(user_id, -4).await,
            Err(FavoriteServiceError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_toggles_match_some_serialization() {
        let service = Arc::new(service_with_posts(&[42]));
        let user_id = Uuid::new_v4();

        let (first, second) = futures::join!(
            service.toggle(user_id, 42),
            service.toggle(user_id, 42)
        );
        let first = first.unwrap();
        let second = second.unwrap();

        // One call added, the other removed, in some order
        assert_ne!(first.is_favorite, second.is_favorite);
        assert_eq!(
            BTreeSet::from([first.count, second.count]),
            BTreeSet::from([0, 1])
        );

        // The final state is consistent with two full toggles
        assert!(!service.is_favorite(user_id, 42).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_drops_deleted_posts_but_counts_stored_set() {
        let service = service_with_posts(&[10]);
        let user_id = Uuid::new_v4();

        service.toggle(user_id, 10).await.unwrap();
        service.toggle(user_id, 99).await.unwrap(); // post 99 no longer exists

        let listing = service
            .list(user_id, DisplayOptions::default())
            .await
            .unwrap();

        assert_eq!(listing.count, 2);
        let ids: Vec<i64> = listing.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![10]);
    }
}
