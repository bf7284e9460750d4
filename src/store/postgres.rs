//! PostgreSQL document store: each collection is a table of JSONB documents.

use super::{Collection, Document, DocumentStore};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const SLUG_INDEX: &str = "products_seo_slug_key";

type DocumentRow = (Uuid, Json<Map<String, Value>>, DateTime<Utc>, DateTime<Utc>);

fn row_to_document((id, Json(fields), created_at, updated_at): DocumentRow) -> Document {
    Document {
        id,
        created_at,
        updated_at,
        fields,
    }
}

/// Create one table per collection if missing, plus the unique product slug index.
pub async fn ensure_collections(pool: &PgPool) -> Result<(), StoreError> {
    for collection in Collection::ALL {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            collection.name()
        );
        sqlx::query(&ddl).execute(pool).await?;
    }
    let slug_index = format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} ((doc #>> '{{seo,slug}}'))",
        SLUG_INDEX,
        Collection::Products.name()
    );
    sqlx::query(&slug_index).execute(pool).await?;
    Ok(())
}

#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        PgDocumentStore { pool }
    }
}

fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() && db.constraint() == Some(SLUG_INDEX) {
            return StoreError::Duplicate("seo.slug");
        }
    }
    StoreError::Query(err)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let sql = format!(
            "SELECT id, doc, created_at, updated_at FROM {} ORDER BY created_at DESC, id",
            collection.name()
        );
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<DocumentRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(row_to_document).collect())
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "SELECT id, doc, created_at, updated_at FROM {} WHERE id = $1",
            collection.name()
        );
        tracing::debug!(sql = %sql, %id, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.map(row_to_document))
    }

    async fn find_by_field(
        &self,
        collection: Collection,
        path: &[&str],
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "SELECT id, doc, created_at, updated_at FROM {} WHERE doc #>> $1 = $2 LIMIT 1",
            collection.name()
        );
        let path: Vec<String> = path.iter().map(|s| s.to_string()).collect();
        tracing::debug!(sql = %sql, path = ?path, value, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(&path)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(row_to_document))
    }

    async fn insert(&self, collection: Collection, fields: Map<String, Value>) -> Result<Document, StoreError> {
        let sql = format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2) RETURNING id, doc, created_at, updated_at",
            collection.name()
        );
        let id = Uuid::new_v4();
        tracing::debug!(sql = %sql, %id, "query");
        let row: DocumentRow = sqlx::query_as(&sql)
            .bind(id)
            .bind(Json(&fields))
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(row_to_document(row))
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "UPDATE {} SET doc = $2, updated_at = NOW() WHERE id = $1 RETURNING id, doc, created_at, updated_at",
            collection.name()
        );
        tracing::debug!(sql = %sql, %id, "query");
        let row: Option<DocumentRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(Json(&fields))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(row.map(row_to_document))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.name());
        tracing::debug!(sql = %sql, %id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
