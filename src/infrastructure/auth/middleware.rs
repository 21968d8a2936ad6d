use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::infrastructure::config::Config;
use crate::{
    domain::auth::JwtManager, error::AppError, infrastructure::repositories::UserRepository,
};
use uuid::Uuid;

/// User context injected into request extensions after authentication
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Identity context for routes that degrade gracefully for anonymous
/// visitors (personalized reads fall back to the configured policy).
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

/// Authentication middleware
pub async fn auth_middleware(
    State((user_repo, config)): State<(Arc<UserRepository>, Arc<Config>)>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = resolve_identity(&user_repo, &config, request.headers()).await?;

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Optional authentication middleware.
///
/// A missing or invalid bearer token is not an error here: the request
/// proceeds anonymously and the handler decides what a logged-out visitor
/// gets to see. Mutating routes must use `auth_middleware` instead.
pub async fn optional_auth_middleware(
    State((user_repo, config)): State<(Arc<UserRepository>, Arc<Config>)>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = match resolve_identity(&user_repo, &config, request.headers()).await {
        Ok(user) => Some(user),
        Err(err) => {
            tracing::debug!(error = %err, "Proceeding without identity");
            None
        }
    };

    request.extensions_mut().insert(MaybeAuthUser(identity));

    next.run(request).await
}

async fn resolve_identity(
    user_repo: &Arc<UserRepository>,
    config: &Arc<Config>,
    headers: &axum::http::HeaderMap,
) -> Result<AuthUser, AppError> {
    // Extract Authorization header
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    // Check Bearer token format
    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Unauthorized(
            "Invalid authorization format".to_string(),
        ));
    }

    let token = &auth_header[7..]; // Skip "Bearer "

    // Validate JWT token
    let jwt_manager = JwtManager::new(config.jwt_secret.clone());

    let claims = jwt_manager.validate_token(token)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

    // Verify user exists in database
    let user = user_repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    Ok(AuthUser {
        user_id: user.id,
        email: user.email,
    })
}
