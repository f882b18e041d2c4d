//! Storage factory
//!
//! Builds the configured storage backend once at startup. The selection
//! logic lives in `Config::from_env`; this module only constructs.

use crate::cloudinary::CloudinaryStorage;
use crate::local::LocalStorage;
use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use videohub_core::{Config, StorageBackend};

/// Sentinel backend used when the cloud backend is selected but its
/// credentials are absent. The server still starts so health and auth
/// endpoints keep working; every store fails fast with a not-configured
/// error (HTTP 501).
pub struct UnconfiguredStorage;

#[async_trait]
impl Storage for UnconfiguredStorage {
    async fn store(
        &self,
        _data: Vec<u8>,
        _original_filename: &str,
        _content_type: &str,
    ) -> StorageResult<StoredObject> {
        Err(StorageError::NotConfigured(
            "Cloud storage is not configured. Set CLOUDINARY_CLOUD_NAME and CLOUDINARY_UPLOAD_PRESET.".to_string(),
        ))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Cloud
    }
}

/// Create the storage backend for the configured `StorageBackend`.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageBackend::Local => {
            let storage =
                LocalStorage::new(&config.upload_dir, config.upload_base_url.clone()).await?;
            tracing::info!(
                upload_dir = %config.upload_dir,
                base_url = %config.upload_base_url,
                "Using local disk storage"
            );
            Ok(Arc::new(storage))
        }
        StorageBackend::Cloud => {
            match (
                config.cloudinary_cloud_name.as_deref(),
                config.cloudinary_upload_preset.as_deref(),
            ) {
                (Some(cloud_name), Some(preset)) => {
                    let storage = CloudinaryStorage::new(
                        cloud_name,
                        preset.to_string(),
                        Duration::from_secs(config.cloud_upload_timeout_secs),
                    )?;
                    tracing::info!(cloud_name = %cloud_name, "Using Cloudinary storage");
                    Ok(Arc::new(storage))
                }
                _ => {
                    tracing::warn!(
                        "Cloud storage selected but CLOUDINARY_CLOUD_NAME/CLOUDINARY_UPLOAD_PRESET are not set; uploads will be rejected"
                    );
                    Ok(Arc::new(UnconfiguredStorage))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 5000,
            database_url: "postgresql://localhost/videohub".to_string(),
            cors_origins: vec!["*".to_string()],
            db_max_connections: 5,
            db_timeout_seconds: 30,
            jwt_secret: "a-test-secret-that-is-long-enough-to-pass".to_string(),
            jwt_expiry_hours: 24,
            environment: "development".to_string(),
            max_video_size_bytes: 100 * 1024 * 1024,
            storage_backend: StorageBackend::Local,
            upload_dir: "uploads".to_string(),
            upload_base_url: "/uploads".to_string(),
            cloudinary_cloud_name: None,
            cloudinary_upload_preset: None,
            cloud_upload_timeout_secs: 60,
        }
    }

    #[tokio::test]
    async fn test_local_backend_selected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = base_config();
        config.upload_dir = dir.path().join("uploads").to_string_lossy().into_owned();

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }

    #[tokio::test]
    async fn test_cloud_backend_without_credentials_is_unconfigured() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::Cloud;

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Cloud);

        let err = storage
            .store(b"data".to_vec(), "clip.mp4", "video/mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_cloud_backend_with_credentials() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::Cloud;
        config.cloudinary_cloud_name = Some("demo".to_string());
        config.cloudinary_upload_preset = Some("unsigned_videos".to_string());

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Cloud);
    }
}
