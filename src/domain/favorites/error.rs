use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum FavoriteServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for FavoriteServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => FavoriteServiceError::Invalid(msg),
            _ => FavoriteServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<FavoriteServiceError> for AppError {
    fn from(err: FavoriteServiceError) -> Self {
        match err {
            FavoriteServiceError::Invalid(msg) => AppError::BadRequest(msg),
            FavoriteServiceError::Dependency(msg) => AppError::Internal(msg),
            FavoriteServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
