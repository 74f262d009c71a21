use snippetbox_storage::StorageError;
use thiserror::Error;

/// Exit codes following Unix conventions
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_NOT_FOUND: i32 = 3;

/// Input rejected before it reaches the store
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InvalidInput(pub String);

/// Convert a storage error to a user-facing message
pub fn format_storage_error(err: &StorageError) -> String {
    match err {
        StorageError::NotFound { id } => format!("No snippet with id {}", id),
        StorageError::Connection { .. } => {
            format!("Database unavailable: {}", err)
        }
        StorageError::InvalidConnectionString(_) => format!("Configuration error: {}", err),
        _ => format!("Storage error: {}", err),
    }
}

/// Get exit code for a storage error
pub fn exit_code_for_error(err: &StorageError) -> i32 {
    match err {
        StorageError::NotFound { .. } => EXIT_NOT_FOUND,
        StorageError::InvalidConnectionString(_) | StorageError::InvalidData(_) => EXIT_USAGE,
        _ => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snippetbox_storage::SnippetId;

    #[test]
    fn test_format_not_found() {
        let err = StorageError::snippet_not_found(SnippetId::new(12));
        assert_eq!(format_storage_error(&err), "No snippet with id 12");
    }

    #[test]
    fn test_format_connection() {
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StorageError::connection("failed to create PostgreSQL pool", source);
        let msg = format_storage_error(&err);
        assert!(msg.starts_with("Database unavailable"));
        assert!(msg.contains("PostgreSQL pool"));
    }

    #[test]
    fn test_exit_code_not_found() {
        let err = StorageError::snippet_not_found(SnippetId::new(1));
        assert_eq!(exit_code_for_error(&err), EXIT_NOT_FOUND);
    }

    #[test]
    fn test_exit_code_invalid_data() {
        let err = StorageError::InvalidData("lifetime too large".into());
        assert_eq!(exit_code_for_error(&err), EXIT_USAGE);
    }

    #[test]
    fn test_exit_code_general_error() {
        let source = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = StorageError::query("insert snippet failed", source);
        assert_eq!(exit_code_for_error(&err), EXIT_ERROR);
    }
}
