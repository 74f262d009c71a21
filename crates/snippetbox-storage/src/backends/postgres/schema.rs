//! Schema bootstrap for PostgreSQL
//!
//! Uses CREATE ... IF NOT EXISTS so `initialize()` is idempotent.

use super::PostgresStorage;
use crate::error::StorageError;

/// Create the `snippets` table and its index if they do not exist
pub async fn initialize_schema(storage: &PostgresStorage) -> Result<(), StorageError> {
    let pool = storage.pool();

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS snippets (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created TIMESTAMPTZ NOT NULL,
            expires TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::migration("failed to create snippets table", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_snippets_expires ON snippets(expires)")
        .execute(pool)
        .await
        .map_err(|e| StorageError::migration("failed to create expires index", e))?;

    tracing::debug!("PostgreSQL schema ready");
    Ok(())
}
