//! SnippetStore implementation for SQLite
//!
//! - Insert a snippet with server-side `created`/`expires`
//! - Get a live snippet by ID
//! - List the latest live snippets

use futures::TryStreamExt;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::SqliteStorage;
use crate::backends::lifetime_param;
use crate::error::StorageError;
use crate::types::{Snippet, SnippetId, LATEST_LIMIT};

const INSERT_SNIPPET: &str = r#"
    INSERT INTO snippets (title, content, created, expires)
    VALUES (
        ?1,
        ?2,
        strftime('%Y-%m-%d %H:%M:%f', 'now'),
        strftime('%Y-%m-%d %H:%M:%f', 'now', ?3 || ' days')
    )
    RETURNING id
"#;

const GET_SNIPPET: &str = r#"
    SELECT id, title, content, created, expires
    FROM snippets
    WHERE expires > strftime('%Y-%m-%d %H:%M:%f', 'now') AND id = ?1
"#;

const LATEST_SNIPPETS: &str = r#"
    SELECT id, title, content, created, expires
    FROM snippets
    WHERE expires > strftime('%Y-%m-%d %H:%M:%f', 'now')
    ORDER BY id DESC
    LIMIT ?1
"#;

fn snippet_from_row(row: &SqliteRow) -> Result<Snippet, sqlx::Error> {
    Ok(Snippet {
        id: SnippetId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created: row.try_get("created")?,
        expires: row.try_get("expires")?,
    })
}

impl SqliteStorage {
    /// Insert a snippet
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidData` if the lifetime does not fit the
    /// bound parameter, `StorageError::Query` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, content), fields(backend = "sqlite"))]
    pub(super) async fn insert_impl(
        &self,
        title: &str,
        content: &str,
        lifetime_days: u32,
    ) -> Result<SnippetId, StorageError> {
        let lifetime_days = lifetime_param(lifetime_days)?;

        let id: i64 = sqlx::query_scalar(INSERT_SNIPPET)
            .bind(title)
            .bind(content)
            .bind(lifetime_days)
            .fetch_one(self.pool())
            .await
            .map_err(|e| StorageError::query("insert snippet failed", e))?;

        tracing::debug!(id, "snippet inserted");
        Ok(SnippetId::new(id))
    }

    /// Get a live snippet by ID
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no live snippet has this ID.
    /// Returns `StorageError::Query` if the database operation fails.
    #[tracing::instrument(level = "debug", skip(self), fields(backend = "sqlite"))]
    pub(super) async fn get_impl(&self, id: SnippetId) -> Result<Snippet, StorageError> {
        let row = sqlx::query(GET_SNIPPET)
            .bind(id.get())
            .fetch_optional(self.pool())
            .await
            .map_err(|e| StorageError::query("get snippet failed", e))?
            .ok_or_else(|| StorageError::snippet_not_found(id))?;

        snippet_from_row(&row).map_err(|e| StorageError::query("get snippet: failed to decode row", e))
    }

    /// List up to `LATEST_LIMIT` live snippets, newest id first
    ///
    /// The row stream holds a pooled connection until it is dropped, which
    /// happens on every return path below.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Query` if the query, a row fetch, or a row
    /// decode fails. Rows already read are discarded.
    #[tracing::instrument(level = "debug", skip(self), fields(backend = "sqlite"))]
    pub(super) async fn latest_impl(&self) -> Result<Vec<Snippet>, StorageError> {
        let mut rows = sqlx::query(LATEST_SNIPPETS)
            .bind(LATEST_LIMIT)
            .fetch(self.pool());

        let mut snippets = Vec::with_capacity(LATEST_LIMIT as usize);
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| StorageError::query("latest snippets: row iteration failed", e))?
        {
            let snippet = snippet_from_row(&row)
                .map_err(|e| StorageError::query("latest snippets: failed to decode row", e))?;
            snippets.push(snippet);
        }

        tracing::debug!(count = snippets.len(), "latest snippets loaded");
        Ok(snippets)
    }
}
