use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    /// Contact fields (phone, mobile, quick_number) as free-form JSON,
    /// filled in lazily as users edit their profile
    pub settings: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    fn setting(&self, key: &str) -> String {
        self.settings
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    pub fn phone(&self) -> String {
        self.setting("phone")
    }

    pub fn mobile(&self) -> String {
        self.setting("mobile")
    }

    pub fn quick_number(&self) -> String {
        self.setting("quick_number")
    }
}
