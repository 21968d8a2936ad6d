use std::sync::Arc;

use intranet_backend::infrastructure::config::{Config, LogFormat};
use intranet_backend::infrastructure::db::{check_connection, create_pool};
use intranet_backend::infrastructure::http::start_http_server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting intranet backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    let user_repo = Arc::new(
        intranet_backend::infrastructure::repositories::UserRepository::new(pool.clone()),
    );
    let preference_repo: Arc<dyn intranet_backend::infrastructure::repositories::PreferenceRepository> =
        Arc::new(intranet_backend::infrastructure::repositories::PgPreferenceRepository::new(
            pool.clone(),
        ));
    let catalog_repo: Arc<dyn intranet_backend::infrastructure::repositories::CatalogRepository> =
        Arc::new(intranet_backend::infrastructure::repositories::PgCatalogRepository::new(
            pool.clone(),
        ));

    // 2. Instantiate services (inject repositories)
    let preference_service = Arc::new(
        intranet_backend::domain::preferences::PreferenceService::new(
            preference_repo.clone(),
            catalog_repo.clone(),
        ),
    );
    let favorite_service = Arc::new(intranet_backend::domain::favorites::FavoriteService::new(
        preference_repo.clone(),
        catalog_repo.clone(),
    ));
    let feed_service = Arc::new(intranet_backend::domain::feed::FeedService::new(
        preference_repo.clone(),
        catalog_repo.clone(),
        config.feed_default_limit,
    ));
    let user_service = Arc::new(intranet_backend::domain::user::UserService::new(
        user_repo.clone(),
    ));

    // 3. Instantiate controllers (inject services)
    let preference_controller = Arc::new(
        intranet_backend::controllers::preferences::PreferenceController::new(preference_service),
    );
    let favorite_controller = Arc::new(
        intranet_backend::controllers::favorites::FavoriteController::new(favorite_service),
    );
    let feed_controller = Arc::new(intranet_backend::controllers::feed::FeedController::new(
        feed_service,
    ));
    let user_controller = Arc::new(intranet_backend::controllers::user::UserController::new(
        user_service,
    ));

    // Start HTTP server with all routes
    start_http_server(
        pool,
        config,
        user_repo,
        preference_controller,
        favorite_controller,
        feed_controller,
        user_controller,
    )
    .await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "intranet_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "intranet_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
