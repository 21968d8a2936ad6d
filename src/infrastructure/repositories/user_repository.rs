use crate::infrastructure::db::DbPool;
use crate::{domain::user::User, error::AppResult};
use std::sync::Arc;
use uuid::Uuid;

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Update display name and contact settings
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        display_name: &str,
        settings: serde_json::Value,
    ) -> AppResult<User> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET display_name = $1, settings = $2, updated_at = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(display_name)
        .bind(settings)
        .bind(now)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}
