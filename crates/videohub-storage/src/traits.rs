//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use thiserror::Error;
use videohub_core::{AppError, StorageBackend};

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Storage backend not configured: {0}")]
    NotConfigured(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::WriteFailed(msg) => AppError::Storage(msg),
            StorageError::Upstream(msg) => AppError::StorageUpstream(msg),
            StorageError::NotConfigured(msg) => AppError::StorageNotConfigured(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            StorageError::IoError(err) => AppError::Storage(err.to_string()),
        }
    }
}

/// Outcome of a successful store: the backend's name for the file and the
/// URL where it can be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub stored_name: String,
    pub url: String,
}

/// Storage abstraction trait
///
/// All storage backends (local filesystem, Cloudinary) implement this trait,
/// so the upload pipeline works with any backend without coupling to
/// implementation details. `data` is the fully buffered file; backends never
/// see partial uploads.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist the file and return its stored name and retrieval URL.
    async fn store(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
    ) -> StorageResult<StoredObject>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

#[cfg(test)]
mod tests {
    use super::*;
    use videohub_core::ErrorMetadata;

    #[test]
    fn test_storage_errors_map_to_app_errors() {
        let err: AppError = StorageError::NotConfigured("cloud not configured".to_string()).into();
        assert_eq!(err.http_status_code(), 501);

        let err: AppError = StorageError::Upstream("provider rejected upload".to_string()).into();
        assert_eq!(err.http_status_code(), 502);

        let err: AppError = StorageError::WriteFailed("disk full".to_string()).into();
        assert_eq!(err.http_status_code(), 500);
    }
}
