//! Storage layer for snippetbox
//!
//! Persists time-bounded text snippets in a single `snippets` table and
//! reads back only the live ones (`expires > now`).
//!
//! # Supported Backends
//!
//! - **SQLite** (feature: `sqlite`, default) - Embedded database, used for tests and single-node installs
//! - **PostgreSQL** (feature: `postgres`) - Networked database for shared deployments
//!
//! # Architecture
//!
//! All backends implement the same traits:
//! - [`SnippetStore`] - `insert`, `get`, `latest`
//! - [`Storage`] - Lifecycle management (initialize, health check, close)
//!
//! Lookups that match no live row fail with [`StorageError::NotFound`];
//! every other variant is a storage failure passed through to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use snippetbox_storage::{create_storage, SnippetStore, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorageConfig::from_url("sqlite://:memory:")?;
//! let storage = create_storage(&config).await?;
//!
//! let id = storage.insert("O snail", "O snail\nClimb Mount Fuji,\nBut slowly, slowly!", 7).await?;
//! let snippet = storage.get(id).await?;
//! assert_eq!(snippet.title, "O snail");
//!
//! for snippet in storage.latest().await? {
//!     println!("{} {}", snippet.id, snippet.title);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod traits;
mod types;

pub mod backends;

// Re-exports
pub use config::{BackendType, ConfigError, StorageConfig};
pub use error::{BoxedError, StorageError};
pub use traits::{SnippetStore, Storage};
pub use types::{Snippet, SnippetId, LATEST_LIMIT};

/// Create storage from configuration
///
/// This is the primary entry point for creating a storage backend.
/// It creates the backend named by the configuration and initializes
/// the schema.
///
/// # Errors
///
/// Returns `StorageError::InvalidConnectionString` if the backend type
/// is not compiled in (missing feature flag).
pub async fn create_storage(
    config: &StorageConfig,
) -> Result<std::sync::Arc<dyn Storage>, StorageError> {
    let storage: std::sync::Arc<dyn Storage> = match config.backend {
        #[cfg(feature = "sqlite")]
        BackendType::Sqlite => std::sync::Arc::new(
            backends::sqlite::SqliteStorage::new(&config.connection_string).await?,
        ),
        #[cfg(not(feature = "sqlite"))]
        BackendType::Sqlite => {
            return Err(StorageError::InvalidConnectionString(
                "SQLite backend not compiled in (enable 'sqlite' feature)".into(),
            ))
        }
        #[cfg(feature = "postgres")]
        BackendType::Postgres => std::sync::Arc::new(
            backends::postgres::PostgresStorage::new(&config.connection_string).await?,
        ),
        #[cfg(not(feature = "postgres"))]
        BackendType::Postgres => {
            return Err(StorageError::InvalidConnectionString(
                "PostgreSQL backend not compiled in (enable 'postgres' feature)".into(),
            ))
        }
    };

    storage.initialize().await?;
    tracing::debug!(backend = storage.backend_name(), "storage ready");
    Ok(storage)
}
