use axum::{
    extract::{Query, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::domain::feed::{DirectoryRequest, FeedRequest, FeedResponse, FeedService, FeedServiceApi};
use crate::{error::AppResult, infrastructure::auth::MaybeAuthUser};

pub struct FeedController {
    feed_service: Arc<FeedService>,
}

impl FeedController {
    pub fn new(feed_service: Arc<FeedService>) -> Self {
        Self { feed_service }
    }

    /// GET /api/feed - Personalized news feed
    ///
    /// Anonymous visitors are served the fallback policy rather than 401.
    pub async fn get_feed(
        State(controller): State<Arc<FeedController>>,
        Extension(MaybeAuthUser(identity)): Extension<MaybeAuthUser>,
        Query(request): Query<FeedRequest>,
    ) -> AppResult<Json<FeedResponse>> {
        let user_id = identity.map(|user| user.user_id);
        let response = controller.feed_service.news_feed(user_id, request).await?;
        Ok(Json(response))
    }

    /// GET /api/systems - Curated systems directory
    pub async fn get_systems(
        State(controller): State<Arc<FeedController>>,
        Extension(MaybeAuthUser(identity)): Extension<MaybeAuthUser>,
        Query(request): Query<DirectoryRequest>,
    ) -> AppResult<Json<FeedResponse>> {
        let user_id = identity.map(|user| user.user_id);
        let response = controller
            .feed_service
            .systems_directory(user_id, request)
            .await?;
        Ok(Json(response))
    }
}
