use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::favorites::{
    FavoriteService, FavoriteServiceApi, FavoritesResponse, ToggleRequest, ToggleResponse,
};
use crate::domain::feed::{DisplayOptions, Layout};
use crate::{error::AppResult, infrastructure::auth::AuthUser};

#[derive(Debug, Deserialize)]
pub struct FavoritesQuery {
    pub limit: Option<usize>,
    pub show_thumbnail: Option<bool>,
    pub show_excerpt: Option<bool>,
    pub show_date: Option<bool>,
    pub layout: Option<Layout>,
}

pub struct FavoriteController {
    favorite_service: Arc<FavoriteService>,
}

impl FavoriteController {
    pub fn new(favorite_service: Arc<FavoriteService>) -> Self {
        Self { favorite_service }
    }

    /// POST /api/favorites/toggle - Flip favorite status for one post
    pub async fn toggle(
        State(controller): State<Arc<FavoriteController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<ToggleRequest>,
    ) -> AppResult<Json<ToggleResponse>> {
        let response = controller
            .favorite_service
            .toggle(auth_user.user_id, request.item_id)
            .await?;
        Ok(Json(response))
    }

    /// GET /api/favorites - List the user's favorites
    pub async fn list(
        State(controller): State<Arc<FavoriteController>>,
        Extension(auth_user): Extension<AuthUser>,
        Query(query): Query<FavoritesQuery>,
    ) -> AppResult<Json<FavoritesResponse>> {
        let options = DisplayOptions {
            limit: query.limit,
            show_thumbnail: query.show_thumbnail.unwrap_or(true),
            show_excerpt: query.show_excerpt.unwrap_or(true),
            show_date: query.show_date.unwrap_or(true),
            layout: query.layout.unwrap_or(Layout::List),
        };

        let response = controller
            .favorite_service
            .list(auth_user.user_id, options)
            .await?;
        Ok(Json(response))
    }
}
