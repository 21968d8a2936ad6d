use crate::domain::feed::CatalogItem;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::catalog_repository::{CatalogRepository, PostFilter};
use async_trait::async_trait;
use std::sync::Arc;

/// Catalog reads over the content tables.
///
/// Every query projects into the shared `CatalogItem` shape so the
/// selector does not care which kind of item it is filtering.
pub struct PgCatalogRepository {
    pool: Arc<DbPool>,
}

impl PgCatalogRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_categories(&self) -> AppResult<Vec<CatalogItem>> {
        let pool = self.pool.as_ref();
        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT
                id,
                name AS label,
                NULL::text AS url,
                NULL::text AS thumbnail_url,
                NULL::text AS excerpt,
                NULL::timestamptz AS published_at,
                item_count,
                ARRAY[]::bigint[] AS term_ids
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    async fn list_systems(&self) -> AppResult<Vec<CatalogItem>> {
        let pool = self.pool.as_ref();
        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT
                id,
                title AS label,
                url,
                thumbnail_url,
                NULL::text AS excerpt,
                NULL::timestamptz AS published_at,
                NULL::bigint AS item_count,
                ARRAY[]::bigint[] AS term_ids
            FROM systems
            WHERE published
            ORDER BY title ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    async fn list_posts(&self, filter: &PostFilter) -> AppResult<Vec<CatalogItem>> {
        let pool = self.pool.as_ref();
        // LIMIT NULL means no limit in Postgres
        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT
                id,
                title AS label,
                permalink AS url,
                thumbnail_url,
                excerpt,
                published_at,
                NULL::bigint AS item_count,
                term_ids
            FROM posts
            WHERE status = 'publish'
            ORDER BY published_at DESC
            LIMIT $1
            "#,
        )
        .bind(filter.limit)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }
}
