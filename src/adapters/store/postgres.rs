//! PostgreSQL document store.
//!
//! Documents live in a single `documents` table keyed by
//! `(collection, key)` with a JSONB body. The `NotExists` guard is
//! serialized through the primary key: the guarded document is inserted
//! with `ON CONFLICT DO NOTHING`, and a zero row count means another
//! invocation won the race. Concurrent commits for the same payment
//! identifier therefore admit exactly one winner, with the loser rolled
//! back untouched.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::ports::{CommitResult, DocumentKey, DocumentStore, Guard, StoreError, WriteOp};

/// PostgreSQL implementation of the DocumentStore port.
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the backing table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                key        TEXT NOT NULL,
                doc        JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                PRIMARY KEY (collection, key)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn get(&self, doc: &DocumentKey) -> Result<Option<Value>, StoreError> {
        sqlx::query_scalar::<_, Value>(
            "SELECT doc FROM documents WHERE collection = $1 AND key = $2",
        )
        .bind(&doc.collection)
        .bind(&doc.key)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn set(&self, doc: &DocumentKey, value: Value) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, doc)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, key)
            DO UPDATE SET doc = EXCLUDED.doc, updated_at = now()
            "#,
        )
        .bind(&doc.collection)
        .bind(&doc.key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    async fn commit_atomic(
        &self,
        guard: Guard,
        writes: Vec<WriteOp>,
    ) -> Result<CommitResult, StoreError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let Guard::NotExists(ref guarded) = guard;

        // The Put targeting the guarded document doubles as the
        // reservation insert; without one the key is reserved with a
        // null body.
        let reserved_value = writes
            .iter()
            .find_map(|w| match w {
                WriteOp::Put { doc, value } if doc == guarded => Some(value.clone()),
                _ => None,
            })
            .unwrap_or(Value::Null);

        let reserved = sqlx::query(
            r#"
            INSERT INTO documents (collection, key, doc)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, key) DO NOTHING
            "#,
        )
        .bind(&guarded.collection)
        .bind(&guarded.key)
        .bind(&reserved_value)
        .execute(&mut *tx)
        .await
        .map_err(store_error)?;

        if reserved.rows_affected() == 0 {
            tx.rollback().await.map_err(store_error)?;
            return Ok(CommitResult::GuardFailed);
        }

        for write in writes {
            match write {
                WriteOp::Put { doc, value } => {
                    if &doc == guarded {
                        // Already written by the reservation insert
                        continue;
                    }
                    sqlx::query(
                        r#"
                        INSERT INTO documents (collection, key, doc)
                        VALUES ($1, $2, $3)
                        ON CONFLICT (collection, key)
                        DO UPDATE SET doc = EXCLUDED.doc, updated_at = now()
                        "#,
                    )
                    .bind(&doc.collection)
                    .bind(&doc.key)
                    .bind(value)
                    .execute(&mut *tx)
                    .await
                    .map_err(store_error)?;
                }
                WriteOp::Merge { doc, value } => {
                    sqlx::query(
                        r#"
                        INSERT INTO documents (collection, key, doc)
                        VALUES ($1, $2, $3)
                        ON CONFLICT (collection, key)
                        DO UPDATE SET doc = documents.doc || EXCLUDED.doc,
                                      updated_at = now()
                        "#,
                    )
                    .bind(&doc.collection)
                    .bind(&doc.key)
                    .bind(value)
                    .execute(&mut *tx)
                    .await
                    .map_err(store_error)?;
                }
            }
        }

        tx.commit().await.map_err(store_error)?;
        Ok(CommitResult::Committed)
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}
