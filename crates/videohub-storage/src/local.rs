use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use videohub_core::StorageBackend;

/// Cap on the sanitized original name. The stored name prepends a
/// `{millis}-{nonce}-` prefix (up to 24 bytes), and the whole thing must
/// stay within the usual 255-byte filesystem NAME_MAX.
const MAX_NAME_LEN: usize = 200;

/// Local filesystem storage implementation
///
/// Files land in a flat upload directory and are served statically from
/// `base_url`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Upload directory (e.g., "uploads")
    /// * `base_url` - Base URL for serving files (e.g., "/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Generate a collision-resistant stored name:
    /// `{unix_millis}-{9-digit random}-{sanitized original name}`.
    fn generate_name(original_filename: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let nonce = rand::rng().random_range(0..1_000_000_000u32);
        format!(
            "{}-{}-{}",
            millis,
            nonce,
            sanitize_filename(original_filename)
        )
    }

    /// Generate public URL for a stored file
    fn generate_url(&self, stored_name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), stored_name)
    }
}

/// Reduce a client-supplied filename to a safe flat name: strip any path
/// components, replace everything outside `[A-Za-z0-9._-]`, and cap the
/// length. An empty result falls back to "video".
pub fn sanitize_filename(original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let mut name: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    name.truncate(MAX_NAME_LEN);

    if name.is_empty() || name.chars().all(|c| c == '.' || c == '_') {
        "video".to_string()
    } else {
        name
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        _content_type: &str,
    ) -> StorageResult<StoredObject> {
        let stored_name = Self::generate_name(original_filename);
        let path = self.base_path.join(&stored_name);
        let size = data.len();

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&stored_name);

        tracing::info!(
            path = %path.display(),
            stored_name = %stored_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(StoredObject { stored_name, url })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
