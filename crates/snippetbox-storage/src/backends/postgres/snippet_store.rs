//! SnippetStore implementation for PostgreSQL

use futures::TryStreamExt;
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::PostgresStorage;
use crate::backends::lifetime_param;
use crate::error::StorageError;
use crate::types::{Snippet, SnippetId, LATEST_LIMIT};

const INSERT_SNIPPET: &str = r#"
    INSERT INTO snippets (title, content, created, expires)
    VALUES ($1, $2, NOW(), NOW() + make_interval(days => $3))
    RETURNING id
"#;

const GET_SNIPPET: &str = r#"
    SELECT id, title, content, created, expires
    FROM snippets
    WHERE expires > NOW() AND id = $1
"#;

const LATEST_SNIPPETS: &str = r#"
    SELECT id, title, content, created, expires
    FROM snippets
    WHERE expires > NOW()
    ORDER BY id DESC
    LIMIT $1
"#;

fn snippet_from_row(row: &PgRow) -> Result<Snippet, sqlx::Error> {
    Ok(Snippet {
        id: SnippetId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created: row.try_get("created")?,
        expires: row.try_get("expires")?,
    })
}

impl PostgresStorage {
    /// Insert a snippet
    #[tracing::instrument(level = "debug", skip(self, content), fields(backend = "postgres"))]
    pub(crate) async fn insert_impl(
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
    #[tracing::instrument(level = "debug", skip(self), fields(backend = "postgres"))]
    pub(crate) async fn get_impl(&self, id: SnippetId) -> Result<Snippet, StorageError> {
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
    /// All-or-nothing: the first failing row aborts the call, and dropping
    /// the stream returns its connection to the pool.
    #[tracing::instrument(level = "debug", skip(self), fields(backend = "postgres"))]
    pub(crate) async fn latest_impl(&self) -> Result<Vec<Snippet>, StorageError> {
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
