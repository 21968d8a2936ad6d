use crate::domain::preferences::PreferenceCategory;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::preference_repository::{
    apply_toggle, PreferenceRepository,
};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

/// Postgres-backed preference storage.
///
/// One row per (user, category); the selected IDs live in a `bigint[]`
/// column and are always written as a whole.
pub struct PgPreferenceRepository {
    pool: Arc<DbPool>,
}

impl PgPreferenceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceRepository for PgPreferenceRepository {
    async fn get(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
    ) -> AppResult<BTreeSet<i64>> {
        let pool = self.pool.as_ref();
        let row = sqlx::query_scalar::<_, Vec<i64>>(
            r#"
            SELECT item_ids
            FROM user_preferences
            WHERE user_id = $1 AND category = $2
            "#,
        )
        .bind(user_id)
        .bind(category.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(row.unwrap_or_default().into_iter().collect())
    }

    async fn replace(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
        values: &BTreeSet<i64>,
    ) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let items: Vec<i64> = values.iter().copied().collect();

        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, category, item_ids, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, category)
            DO UPDATE SET item_ids = EXCLUDED.item_ids, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(category.as_str())
        .bind(&items)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn toggle(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
        item_id: i64,
    ) -> AppResult<(bool, u64)> {
        let mut tx = self.pool.begin().await?;

        // Make sure the row exists so the FOR UPDATE lock below serializes
        // concurrent toggles even for a user who never saved anything.
        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, category, item_ids, updated_at)
            VALUES ($1, $2, '{}', $3)
            ON CONFLICT (user_id, category) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(category.as_str())
        .bind(chrono::Utc::now())
        .execute(&mut *tx)
        .await?;

        let stored = sqlx::query_scalar::<_, Vec<i64>>(
            r#"
            SELECT item_ids
            FROM user_preferences
            WHERE user_id = $1 AND category = $2
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(category.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let mut set: BTreeSet<i64> = stored.into_iter().collect();
        let is_member = apply_toggle(&mut set, item_id);
        let items: Vec<i64> = set.iter().copied().collect();

        sqlx::query(
            r#"
            UPDATE user_preferences
            SET item_ids = $3, updated_at = $4
            WHERE user_id = $1 AND category = $2
            "#,
        )
        .bind(user_id)
        .bind(category.as_str())
        .bind(&items)
        .bind(chrono::Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((is_member, set.len() as u64))
    }
}
