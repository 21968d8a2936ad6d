use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::{
    controllers::{
        favorites::FavoriteController, feed::FeedController, health,
        preferences::PreferenceController, user::UserController,
    },
    infrastructure::auth::{auth_middleware, optional_auth_middleware, request_id_middleware},
};

use crate::infrastructure::repositories::UserRepository;

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    user_repo: Arc<UserRepository>,
    preference_controller: Arc<PreferenceController>,
    favorite_controller: Arc<FavoriteController>,
    feed_controller: Arc<FeedController>,
    user_controller: Arc<UserController>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Preference routes (require authentication)
    let preference_routes = Router::new()
        .route(
            "/api/preferences/:category",
            get(PreferenceController::get_preferences)
                .put(PreferenceController::save_preferences),
        )
        .route(
            "/api/preferences/:category/options",
            get(PreferenceController::available_options),
        )
        .with_state(preference_controller.clone())
        .layer(middleware::from_fn_with_state(
            (user_repo.clone(), config.clone()),
            auth_middleware,
        ));

    // Favorite routes (require authentication)
    let favorite_routes = Router::new()
        .route("/api/favorites", get(FavoriteController::list))
        .route(
            "/api/favorites/toggle",
            axum::routing::post(FavoriteController::toggle),
        )
        .with_state(favorite_controller.clone())
        .layer(middleware::from_fn_with_state(
            (user_repo.clone(), config.clone()),
            auth_middleware,
        ));

    // Feed and systems routes degrade gracefully without a token
    let feed_routes = Router::new()
        .route("/api/feed", get(FeedController::get_feed))
        .route("/api/systems", get(FeedController::get_systems))
        .with_state(feed_controller.clone())
        .layer(middleware::from_fn_with_state(
            (user_repo.clone(), config.clone()),
            optional_auth_middleware,
        ));

    // User routes (require authentication)
    let user_routes = Router::new()
        .route(
            "/api/me",
            get(UserController::get_me).patch(UserController::update_me),
        )
        .with_state(user_controller.clone())
        .layer(middleware::from_fn_with_state(
            (user_repo.clone(), config.clone()),
            auth_middleware,
        ));

    // Build application routes
    let app = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool.clone())
        .merge(preference_routes)
        .merge(favorite_routes)
        .merge(feed_routes)
        .merge(user_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
