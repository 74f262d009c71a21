//! Shared test harness for storage backends
//!
//! This module provides generic test functions that verify correct
//! implementation of the storage traits. All storage backends must
//! pass these tests to ensure consistent behavior.
//!
//! # Usage
//!
//! ```ignore
//! use snippetbox_storage::backends::sqlite::SqliteStorage;
//!
//! #[tokio::test]
//! async fn sqlite_passes_all_tests() {
//!     let storage = SqliteStorage::new(":memory:").await.unwrap();
//!     storage.initialize().await.unwrap();
//!     common::run_all_tests(&storage).await;
//! }
//! ```
//!
//! # Adding Tests for New Backends
//!
//! 1. Create a new test file (e.g., `tests/mysql_backend.rs`)
//! 2. Initialize your storage backend against an empty database
//! 3. Call `run_all_tests(&storage).await`
//!
//! See `tests/sqlite_backend.rs` for a complete example.

pub mod snippet_store_tests;

use snippetbox_storage::Storage;

/// Run all storage trait tests
///
/// Expects a freshly initialized, empty store: the empty-store checks run
/// first, before anything has been inserted.
pub async fn run_all_tests<S: Storage>(storage: &S) {
    println!("Running SnippetStore tests...");
    snippet_store_tests::run_all(storage).await;

    println!("All storage tests passed!");
}
