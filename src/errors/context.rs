//! Error context enhancement utilities
//!
//! Attaches the operation and file path to foreign errors while keeping the
//! original error as the source.

use super::types::ClientError;
use std::path::PathBuf;

/// Extension trait for adding context to error types
pub trait ErrorContextExt<T> {
    /// Add operation and file context
    fn in_file_operation(
        self,
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
    ) -> Result<T, ClientError>;
}

impl<T, E> ErrorContextExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn in_file_operation(
        self,
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
    ) -> Result<T, ClientError> {
        let path = path.into();
        let operation = operation.into();
        self.map_err(|e| ClientError::Config {
            message: format!("{} in file '{}': {}", operation, path.display(), e),
            source: Some(Box::new(e)),
        })
    }
}
