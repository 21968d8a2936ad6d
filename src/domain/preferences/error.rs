use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum PreferenceServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for PreferenceServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => PreferenceServiceError::Invalid(msg),
            _ => PreferenceServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<PreferenceServiceError> for AppError {
    fn from(err: PreferenceServiceError) -> Self {
        match err {
            PreferenceServiceError::Invalid(msg) => AppError::BadRequest(msg),
            PreferenceServiceError::Dependency(msg) => AppError::Internal(msg),
            PreferenceServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
