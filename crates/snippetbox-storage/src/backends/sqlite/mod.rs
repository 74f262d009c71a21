//! SQLite storage backend implementation using sqlx
//!
//! SQLite is a lightweight, file-based database that needs no server and
//! works well for tests and single-node installs.
//!
//! # Architecture
//!
//! - **schema**: `snippets` table bootstrap (CREATE ... IF NOT EXISTS)
//! - **snippet_store**: `insert`, `get`, `latest`
//!
//! # Timestamps
//!
//! SQLite has no native timestamp type. `created` and `expires` are stored as
//! `YYYY-MM-DD HH:MM:SS.SSS` UTC text produced by `strftime`, and reads
//! compare against the same expression for "now". Fixed-width text in this
//! format sorts the same way as the instants it encodes.
//!
//! # Connection Management
//!
//! Uses sqlx's SqlitePool for async database operations. An in-memory
//! database lives inside a single connection, so `:memory:` pools are capped
//! at one connection that is never recycled.
//!
//! # Security
//!
//! All queries use sqlx's prepared statement bindings (`bind()`), including
//! the lifetime in days. Caller data is never interpolated into query strings.

use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;

use crate::error::StorageError;
use crate::traits::{SnippetStore, Storage};
use crate::types::{Snippet, SnippetId};

mod schema;
mod snippet_store;

/// SQLite storage backend
///
/// # Examples
///
/// ```no_run
/// use snippetbox_storage::backends::sqlite::SqliteStorage;
/// use snippetbox_storage::Storage;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // In-memory database for testing
/// let storage = SqliteStorage::new(":memory:").await?;
/// storage.initialize().await?;
///
/// // File-based database
/// let storage = SqliteStorage::new("/var/lib/snippetbox/snippets.sqlite").await?;
/// storage.initialize().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new SQLite storage backend
    ///
    /// # Arguments
    ///
    /// * `path` - Database path or `:memory:` for in-memory database
    ///   - `:memory:` - In-memory database (for testing)
    ///   - `/path/to/file.sqlite` - File-based database, created if missing
    ///
    /// # Pool Configuration
    ///
    /// - min_connections: 1
    /// - max_connections: 5 for files (single writer), 1 for `:memory:`
    /// - acquire_timeout: 30s
    /// - idle_timeout: 10min for files, never for `:memory:`
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the database connection fails.
    pub async fn new(path: &str) -> Result<Self, StorageError> {
        let in_memory = path == ":memory:";

        let pool_options = SqlitePoolOptions::new()
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30));

        let pool = if in_memory {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StorageError::connection("invalid SQLite URL", e))?;

            pool_options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await
        } else {
            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);

            pool_options
                .max_connections(5) // SQLite is single-writer
                .idle_timeout(Duration::from_secs(600))
                .connect_with(options)
                .await
        }
        .map_err(|e| StorageError::connection("failed to create SQLite pool", e))?;

        tracing::debug!(path, "opened SQLite pool");
        Ok(Self { pool })
    }

    /// Wrap an already-connected pool
    ///
    /// The caller owns the pool configuration. `initialize()` still has to
    /// be called before first use if the schema may be missing.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool for internal use
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SnippetStore for SqliteStorage {
    async fn insert(
        &self,
        title: &str,
        content: &str,
        lifetime_days: u32,
    ) -> Result<SnippetId, StorageError> {
        self.insert_impl(title, content, lifetime_days).await
    }

    async fn get(&self, id: SnippetId) -> Result<Snippet, StorageError> {
        self.get_impl(id).await
    }

    async fn latest(&self) -> Result<Vec<Snippet>, StorageError> {
        self.latest_impl().await
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn initialize(&self) -> Result<(), StorageError> {
        schema::initialize_schema(self).await
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::connection("health check: database connection failed", e))?;

        let table_exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM sqlite_master
                WHERE type = 'table' AND name = 'snippets'
            )
            "#,
        )
        .fetch_one(self.pool())
        .await
        .map_err(|e| StorageError::connection("health check: failed to verify schema", e))?;

        if !table_exists {
            return Err(StorageError::connection(
                "health check: schema not initialized (snippets table missing)",
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "schema not initialized - call initialize() first",
                ),
            ));
        }

        Ok(())
    }

    async fn close(&self) -> Result<(), StorageError> {
        self.pool.close().await;
        tracing::debug!("closed SQLite pool");
        Ok(())
    }
}
