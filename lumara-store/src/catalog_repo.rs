use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use lumara_core::listing::ServiceKind;
use lumara_core::repository::CatalogRepository;

/// One repository over the five listing tables. The table name comes from
/// `ServiceKind::table()`, a closed set, so interpolating it into the query
/// text is safe; all values are bound.
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_available(
        &self,
        kind: ServiceKind,
        limit: i64,
    ) -> Result<Vec<Value>, Box<dyn std::error::Error + Send + Sync>> {
        let docs = sqlx::query_scalar::<_, Value>(&format!(
            "SELECT doc FROM {} WHERE available = TRUE ORDER BY created_at DESC LIMIT $1",
            kind.table()
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(docs)
    }

    async fn get(
        &self,
        kind: ServiceKind,
        id: Uuid,
    ) -> Result<Option<Value>, Box<dyn std::error::Error + Send + Sync>> {
        let doc = sqlx::query_scalar::<_, Value>(&format!(
            "SELECT doc FROM {} WHERE id = $1",
            kind.table()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doc)
    }

    async fn insert(
        &self,
        kind: ServiceKind,
        id: Uuid,
        available: bool,
        doc: &Value,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(&format!(
            "INSERT INTO {} (id, available, doc) VALUES ($1, $2, $3)",
            kind.table()
        ))
        .bind(id)
        .bind(available)
        .bind(doc)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn replace(
        &self,
        kind: ServiceKind,
        id: Uuid,
        available: bool,
        doc: &Value,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET available = $2, doc = $3 WHERE id = $1",
            kind.table()
        ))
        .bind(id)
        .bind(available)
        .bind(doc)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(
        &self,
        kind: ServiceKind,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_available(
        &self,
        kind: ServiceKind,
    ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE available = TRUE",
            kind.table()
        ))
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
