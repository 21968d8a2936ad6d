use super::dto::{ProfileResponse, UpdateProfileRequest};
use super::User;
use crate::{
    error::{AppError, AppResult},
    infrastructure::repositories::UserRepository,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

const MAX_DISPLAY_NAME_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 32;
const MAX_QUICK_NUMBER_LEN: usize = 8;

pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Get user profile with contact fields
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<ProfileResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(Self::build_profile_response(&user))
    }

    /// Update display name and contact fields
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        updates: UpdateProfileRequest,
    ) -> AppResult<ProfileResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut settings = if user.settings.is_object() {
            user.settings.clone()
        } else {
            json!({})
        };
        let mut display_name = user.display_name.clone();

        if let Some(name) = updates.display_name {
            display_name = validate_display_name(&name)?;
        }
        if let Some(phone) = updates.phone {
            validate_phone(&phone)?;
            settings["phone"] = json!(phone.trim());
        }
        if let Some(mobile) = updates.mobile {
            validate_phone(&mobile)?;
            settings["mobile"] = json!(mobile.trim());
        }
        if let Some(quick_number) = updates.quick_number {
            validate_quick_number(&quick_number)?;
            settings["quick_number"] = json!(quick_number.trim());
        }

        let updated = self
            .user_repo
            .update_profile(user_id, &display_name, settings)
            .await?;

        Ok(Self::build_profile_response(&updated))
    }

    fn build_profile_response(user: &User) -> ProfileResponse {
        ProfileResponse {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            phone: user.phone(),
            mobile: user.mobile(),
            quick_number: user.quick_number(),
        }
    }
}

fn validate_display_name(value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    // Character count, not bytes: Swedish names carry å/ä/ö.
    let length = trimmed.chars().count();
    if length == 0 || length > MAX_DISPLAY_NAME_LEN {
        return Err(AppError::BadRequest(
            "Display name must be 1-100 characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_phone(value: &str) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.len() > MAX_PHONE_LEN {
        return Err(AppError::BadRequest(
            "Phone number too long".to_string(),
        ));
    }
    let valid = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
    if !valid {
        return Err(AppError::BadRequest(format!(
            "Invalid phone number: {}",
            trimmed
        )));
    }
    Ok(())
}

fn validate_quick_number(value: &str) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.len() > MAX_QUICK_NUMBER_LEN || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(format!(
            "Invalid quick number: {}",
            trimmed
        )));
    }
    Ok(())
}
