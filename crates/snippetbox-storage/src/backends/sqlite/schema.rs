//! Schema bootstrap for SQLite
//!
//! `id` uses AUTOINCREMENT so ids are never reused, even after rows at the
//! top of the range are removed by an outside retention job. `latest` relies
//! on ids growing with insertion order.

use super::SqliteStorage;
use crate::error::StorageError;

/// Create the `snippets` table and its index if they do not exist
pub async fn initialize_schema(storage: &SqliteStorage) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS snippets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created DATETIME NOT NULL,
            expires DATETIME NOT NULL
        )
        "#,
    )
    .execute(storage.pool())
    .await
    .map_err(|e| StorageError::migration("failed to create snippets table", e))?;

    // Every read filters on expires
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_snippets_expires ON snippets(expires)")
        .execute(storage.pool())
        .await
        .map_err(|e| StorageError::migration("failed to create expires index", e))?;

    tracing::debug!("SQLite schema ready");
    Ok(())
}
