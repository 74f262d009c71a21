//! Storage trait definitions
//!
//! - SnippetStore: the three snippet operations
//! - Storage: SnippetStore plus lifecycle management

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{Snippet, SnippetId};

/// Snippet persistence
///
/// Every read applies the live rule (`expires > now`, evaluated by the
/// storage engine). Expired rows stay in storage but are invisible.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Insert a new snippet
    ///
    /// `created` is set to the storage engine's current time and `expires`
    /// to `created + lifetime_days` days. The lifetime is bound as a typed
    /// parameter.
    ///
    /// # Arguments
    /// * `title` - Snippet title
    /// * `content` - Snippet body
    /// * `lifetime_days` - Days until the snippet expires (0 = already expired)
    ///
    /// # Returns
    /// The identifier assigned by the storage engine
    ///
    /// # Errors
    /// * `StorageError::InvalidData` - `lifetime_days` exceeds the engine's integer range
    /// * `StorageError::Query` - Database error
    async fn insert(
        &self,
        title: &str,
        content: &str,
        lifetime_days: u32,
    ) -> Result<SnippetId, StorageError>;

    /// Get a live snippet by ID
    ///
    /// # Arguments
    /// * `id` - The snippet identifier
    ///
    /// # Errors
    /// * `StorageError::NotFound` - No such snippet, or it has expired
    /// * `StorageError::Query` - Database error
    async fn get(&self, id: SnippetId) -> Result<Snippet, StorageError>;

    /// List the most recent live snippets
    ///
    /// Returns at most [`LATEST_LIMIT`](crate::LATEST_LIMIT) snippets sorted
    /// by id descending. Returns an empty list when nothing is live.
    ///
    /// # Errors
    /// * `StorageError::Query` - Database or row iteration error. Rows already
    ///   read are discarded.
    async fn latest(&self) -> Result<Vec<Snippet>, StorageError>;
}

/// Combined storage interface with lifecycle management
#[async_trait]
pub trait Storage: SnippetStore {
    /// Short backend name for logs and diagnostics
    fn backend_name(&self) -> &'static str;

    /// Create the `snippets` table and its index if absent
    ///
    /// Idempotent - safe to call multiple times.
    ///
    /// # Errors
    /// * `StorageError::Migration` - Schema setup failed
    async fn initialize(&self) -> Result<(), StorageError>;

    /// Check connectivity and that the schema exists
    ///
    /// # Errors
    /// * `StorageError::Connection` - Backend unreachable or schema missing
    async fn health_check(&self) -> Result<(), StorageError>;

    /// Close storage connections
    ///
    /// Idempotent. No other operations should be performed afterwards.
    async fn close(&self) -> Result<(), StorageError>;
}
