//! Storage backend implementations
//!
//! This module contains implementations of the Storage trait for different databases.
//! At least one backend must be enabled via feature flags.

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::error::StorageError;

/// Convert a caller-supplied lifetime to the engine's 32-bit integer range
///
/// Both backends bind the value as a typed parameter; this only rejects
/// values the parameter type cannot hold.
pub(crate) fn lifetime_param(lifetime_days: u32) -> Result<i32, StorageError> {
    i32::try_from(lifetime_days).map_err(|_| {
        StorageError::InvalidData(format!(
            "lifetime of {} days exceeds the supported maximum of {} days",
            lifetime_days,
            i32::MAX
        ))
    })
}
