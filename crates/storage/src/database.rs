use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::store::{Document, DocumentStore, Page, StoredDocument};

/// Postgres-backed [`DocumentStore`].
///
/// Every collection shares the `documents` table; each record's data is a
/// JSONB object and both timestamps come from the server's `now()`.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    document_id: Uuid,
    data: Json<Document>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.document_id,
            data: row.data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for Database {
    async fn insert(&self, collection: &str, data: Document) -> Result<StoredDocument> {
        let id = Uuid::new_v4();
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, document_id, data)
            VALUES ($1, $2, $3)
            RETURNING document_id, data, created_at, updated_at
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(data))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<StoredDocument> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT document_id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND document_id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    async fn list(
        &self,
        collection: &str,
        filter: &Document,
        page: Page,
    ) -> Result<Vec<StoredDocument>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT document_id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND data @> $2
            ORDER BY created_at, document_id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(collection)
        .bind(Json(filter))
        .bind(i64::try_from(page.limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn count(&self, collection: &str, filter: &Document) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM documents
            WHERE collection = $1 AND data @> $2
            "#,
        )
        .bind(collection)
        .bind(Json(filter))
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }

    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        data: Document,
    ) -> Result<StoredDocument> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET data = $3, updated_at = GREATEST(now(), updated_at)
            WHERE collection = $1 AND document_id = $2
            RETURNING document_id, data, created_at, updated_at
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(data))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND document_id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
