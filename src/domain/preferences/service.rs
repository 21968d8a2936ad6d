use super::error::PreferenceServiceError;
use super::model::{sanitize_ids, PreferenceCategory};
use super::{PreferencesResponse, SavePreferencesRequest};
use crate::domain::feed::CatalogItem;
use crate::infrastructure::repositories::{CatalogRepository, PostFilter, PreferenceRepository};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct PreferenceService {
    preference_repo: Arc<dyn PreferenceRepository>,
    catalog_repo: Arc<dyn CatalogRepository>,
}

impl PreferenceService {
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
pub trait PreferenceServiceApi: Send + Sync {
    /// Read the stored selection; users who never saved get the empty set.
    async fn get_preferences(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
    ) -> Result<PreferencesResponse, PreferenceServiceError>;

    /// Sanitize and persist a whole-set replacement, returning what was
    /// actually stored. Malformed entries are cleaned away, not rejected.
    async fn save_preferences(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
        request: SavePreferencesRequest,
    ) -> Result<PreferencesResponse, PreferenceServiceError>;

    /// Everything the user could select for this category, in the
    /// catalog's display order, for rendering a settings page.
    async fn available_items(
        &self,
        category: PreferenceCategory,
    ) -> Result<Vec<CatalogItem>, PreferenceServiceError>;
}

#[async_trait]
impl PreferenceServiceApi for PreferenceService {
    async fn get_preferences(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
    ) -> Result<PreferencesResponse, PreferenceServiceError> {
        let values = self
            .preference_repo
            .get(user_id, category)
            .await
            .map_err(|e| PreferenceServiceError::Dependency(e.to_string()))?;

        Ok(PreferencesResponse {
            category,
            values: values.into_iter().collect(),
        })
    }

    async fn save_preferences(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
        request: SavePreferencesRequest,
    ) -> Result<PreferencesResponse, PreferenceServiceError> {
        let sanitized = sanitize_ids(&request.values);

        let dropped = request.values.len().saturating_sub(sanitized.len());
        if dropped > 0 {
            tracing::debug!(
                user_id = %user_id,
                category = %category,
                dropped,
                "Dropped invalid preference entries during save"
            );
        }

        self.preference_repo
            .replace(user_id, category, &sanitized)
            .await
            .map_err(|e| PreferenceServiceError::Dependency(e.to_string()))?;

        Ok(PreferencesResponse {
            category,
            values: sanitized.into_iter().collect(),
        })
    }

    async fn available_items(
        &self,
        category: PreferenceCategory,
    ) -> Result<Vec<CatalogItem>, PreferenceServiceError> {
        let items = match category {
            PreferenceCategory::NewsCategories => self.catalog_repo.list_categories().await,
            PreferenceCategory::SelectedSystems => self.catalog_repo.list_systems().await,
            PreferenceCategory::FavoritePosts => {
                self.catalog_repo.list_posts(&PostFilter::default()).await
            }
        }
        .map_err(|e| PreferenceServiceError::Dependency(e.to_string()))?;

        Ok(items)
    }
}
