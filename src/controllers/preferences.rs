use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::feed::CatalogItem;
use crate::domain::preferences::{
    PreferenceCategory, PreferenceService, PreferenceServiceApi, PreferencesResponse,
    SavePreferencesRequest,
};
use crate::{
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

pub struct PreferenceController {
    preference_service: Arc<PreferenceService>,
}

impl PreferenceController {
    pub fn new(preference_service: Arc<PreferenceService>) -> Self {
        Self { preference_service }
    }

    /// GET /api/preferences/{category} - Read the stored selection
    pub async fn get_preferences(
        State(controller): State<Arc<PreferenceController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(category): Path<String>,
    ) -> AppResult<Json<PreferencesResponse>> {
        let category = parse_category(&category)?;
        let response = controller
            .preference_service
            .get_preferences(auth_user.user_id, category)
            .await?;
        Ok(Json(response))
    }

    /// PUT /api/preferences/{category} - Replace the stored selection
    pub async fn save_preferences(
        State(controller): State<Arc<PreferenceController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(category): Path<String>,
        Json(request): Json<SavePreferencesRequest>,
    ) -> AppResult<Json<PreferencesResponse>> {
        let category = parse_category(&category)?;
        let response = controller
            .preference_service
            .save_preferences(auth_user.user_id, category, request)
            .await?;
        Ok(Json(response))
    }

    /// GET /api/preferences/{category}/options - Selectable items
    pub async fn available_options(
        State(controller): State<Arc<PreferenceController>>,
        Path(category): Path<String>,
    ) -> AppResult<Json<Vec<CatalogItem>>> {
        let category = parse_category(&category)?;
        let items = controller
            .preference_service
            .available_items(category)
            .await?;
        Ok(Json(items))
    }
}

fn parse_category(raw: &str) -> Result<PreferenceCategory, AppError> {
    PreferenceCategory::from_str(raw).map_err(AppError::BadRequest)
}
