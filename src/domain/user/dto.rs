use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for GET /api/me
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub phone: String,
    pub mobile: String,
    pub quick_number: String,
}

/// Partial update for PATCH /api/me; absent fields stay untouched
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub quick_number: Option<String>,
}
