//! Storage error types

use std::error::Error as StdError;
use thiserror::Error;

use crate::types::SnippetId;

/// Boxed driver error carried as the source of a storage failure
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Errors returned by snippet stores
///
/// `NotFound` is the one outcome callers are expected to handle as a normal
/// result. Every other variant is a storage failure and is passed upward
/// without interpretation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No live snippet has this id (never inserted, or expired)
    #[error("no live snippet with id {id}")]
    NotFound { id: SnippetId },

    /// Pool creation or health check failed
    #[error("connection failed: {message}")]
    Connection {
        message: String,
        #[source]
        source: BoxedError,
    },

    /// Statement execution, row decoding or row iteration failed
    #[error("query failed: {message}")]
    Query {
        message: String,
        #[source]
        source: BoxedError,
    },

    /// Creating the snippets table or its index failed
    #[error("schema setup failed: {message}")]
    Migration {
        message: String,
        #[source]
        source: BoxedError,
    },

    /// Connection string rejected, or its backend is not compiled in
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// Argument outside what the database can bind
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl StorageError {
    pub fn connection(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            source: Box::new(source),
        }
    }

    pub fn query(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Query {
            message: message.into(),
            source: Box::new(source),
        }
    }

    pub fn migration(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Migration {
            message: message.into(),
            source: Box::new(source),
        }
    }

    pub fn snippet_not_found(id: SnippetId) -> Self {
        Self::NotFound { id }
    }

    /// True when the lookup matched no live snippet
    ///
    /// Everything else is a storage failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_connection_error_helper() {
        let source = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let err = StorageError::connection("failed to connect", source);

        match err {
            StorageError::Connection { message, source } => {
                assert_eq!(message, "failed to connect");
                assert_eq!(source.to_string(), "refused");
            }
            _ => panic!("Expected Connection variant"),
        }
    }

    #[test]
    fn test_query_error_keeps_source_chain() {
        let source = io::Error::new(io::ErrorKind::Other, "disk I/O error");
        let err = StorageError::query("insert failed", source);

        let inner = StdError::source(&err).expect("source should be preserved");
        assert_eq!(inner.to_string(), "disk I/O error");
    }

    #[test]
    fn test_migration_error_keeps_source_chain() {
        let source = io::Error::new(io::ErrorKind::Other, "syntax error");
        let err = StorageError::migration("create snippets table", source);

        assert_eq!(
            err.to_string(),
            "schema setup failed: create snippets table"
        );
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn test_snippet_not_found() {
        let err = StorageError::snippet_not_found(SnippetId::new(42));

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no live snippet with id 42");
        assert!(StdError::source(&err).is_none());
    }

    #[test]
    fn test_storage_failures_are_not_not_found() {
        let source = io::Error::new(io::ErrorKind::Other, "boom");
        assert!(!StorageError::query("q", source).is_not_found());
        assert!(!StorageError::InvalidData("lifetime too large".into()).is_not_found());
        assert!(!StorageError::InvalidConnectionString("x".into()).is_not_found());
    }
}
