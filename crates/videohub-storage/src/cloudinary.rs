use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use videohub_core::StorageBackend;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A malformed client-supplied content type is not an upstream problem;
/// send the file as a generic byte stream instead.
fn resolve_content_type(content_type: &str) -> &str {
    if content_type.parse::<mime::Mime>().is_ok() {
        content_type
    } else {
        FALLBACK_CONTENT_TYPE
    }
}

/// Cloudinary unsigned video upload backend.
///
/// The buffered file is POSTed as multipart form data to the account's
/// video upload endpoint; Cloudinary assigns the stored name (`public_id`)
/// and returns the public `secure_url`.
pub struct CloudinaryStorage {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
    error: Option<UploadError>,
}

#[derive(Debug, Deserialize)]
struct UploadError {
    message: String,
}

impl CloudinaryStorage {
    pub fn new(
        cloud_name: &str,
        upload_preset: String,
        timeout: Duration,
    ) -> StorageResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                StorageError::ConfigError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(CloudinaryStorage {
            client,
            upload_url: format!(
                "https://api.cloudinary.com/v1_1/{}/video/upload",
                cloud_name
            ),
            upload_preset,
        })
    }

    /// Pull the stored name and URL out of a provider response, surfacing the
    /// provider's own error message when it gave one.
    fn extract_stored_object(success: bool, body: &str) -> StorageResult<StoredObject> {
        let parsed: UploadResponse = serde_json::from_str(body)
            .map_err(|_| StorageError::Upstream("Unexpected response from video host".to_string()))?;

        if let Some(error) = parsed.error {
            return Err(StorageError::Upstream(error.message));
        }

        if !success {
            return Err(StorageError::Upstream(
                "Video host rejected the upload".to_string(),
            ));
        }

        match parsed.secure_url {
            Some(url) => Ok(StoredObject {
                stored_name: parsed.public_id.unwrap_or_else(|| url.clone()),
                url,
            }),
            None => Err(StorageError::Upstream(
                "Video host response missing secure_url".to_string(),
            )),
        }
    }
}

#[async_trait]
impl Storage for CloudinaryStorage {
    async fn store(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
    ) -> StorageResult<StoredObject> {
        let size = data.len();
        let start = std::time::Instant::now();

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(original_filename.to_string())
            .mime_str(resolve_content_type(content_type))
            .map_err(|e| StorageError::ConfigError(format!("Failed to build form part: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("resource_type", "video");

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::Upstream(format!("Video host unreachable: {}", e)))?;

        let success = response.status().is_success();
        let body = response
            .text()
            .await
            .map_err(|e| StorageError::Upstream(format!("Failed to read response: {}", e)))?;

        let stored = Self::extract_stored_object(success, &body)?;

        tracing::info!(
            stored_name = %stored.stored_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Cloudinary upload successful"
        );

        Ok(stored)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Cloud
    }
}
