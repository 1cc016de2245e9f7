//! Error handling for gshot-store
//!
//! Wraps gshot-core ExError with store-specific helpers

use gshot_core::errors::{ExError, ExErrorKind, GshotError};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error for a filesystem operation on `path`
pub fn io_error(op: &str, path: &Path, err: std::io::Error) -> ExError {
    GshotError::io(op, path, err).into()
}

/// Create a missing blob error
pub fn blob_missing(digest: &str) -> ExError {
    GshotError::BlobNotFound {
        digest: digest.to_string(),
    }
    .into()
}

/// Create a serialization error for a persisted file
pub fn serialization_error(op: &str, path: &Path, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(op)
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an invalid input error
pub fn invalid_input(op: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(op)
        .with_message(reason)
}

/// Create a not-a-repository error for a working copy root
pub fn not_a_repository(root: &Path) -> ExError {
    GshotError::NotARepository {
        path: root.display().to_string(),
    }
    .into()
}
