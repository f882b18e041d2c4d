//! Video upload pipeline.
//!
//! Single entry point for authenticated uploads: parse the multipart form,
//! validate, hand the buffered file to the storage backend, then record the
//! asset in the catalog. Validation is strictly before storage, so a request
//! that fails validation never touches the backend. A catalog row is written
//! only after the backend accepted the bytes, exactly once per upload.

use axum::extract::Multipart;
use std::sync::Arc;
use videohub_core::models::{NewVideo, Video};
use videohub_core::AppError;
use videohub_db::VideoRepository;
use videohub_storage::Storage;

const DEFAULT_FILENAME: &str = "video.mp4";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Raw fields collected from the multipart form, before validation.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<FilePart>,
    title: Option<String>,
}

#[derive(Debug)]
struct FilePart {
    data: Vec<u8>,
    filename: String,
    content_type: String,
}

#[derive(Clone)]
pub struct VideoUploadService {
    storage: Arc<dyn Storage>,
    catalog: VideoRepository,
    max_file_size: usize,
}

impl VideoUploadService {
    pub fn new(storage: Arc<dyn Storage>, catalog: VideoRepository, max_file_size: usize) -> Self {
        Self {
            storage,
            catalog,
            max_file_size,
        }
    }

    /// Run the full pipeline for one upload request.
    pub async fn upload(&self, multipart: Multipart) -> Result<Video, AppError> {
        let form = collect_upload_form(multipart).await?;
        let (file, title) = validate(form, self.max_file_size)?;

        let size = file.data.len();
        let stored = self
            .storage
            .store(file.data, &file.filename, &file.content_type)
            .await?;

        tracing::debug!(
            stored_name = %stored.stored_name,
            size_bytes = size,
            "File accepted by storage backend"
        );

        let video = self
            .catalog
            .create(NewVideo {
                title,
                filename: stored.stored_name,
                video_url: stored.url,
            })
            .await?;

        tracing::info!(video_id = %video.id, title = %video.title, "Video uploaded");

        Ok(video)
    }
}

/// Drain the multipart stream into an `UploadForm`. No validation happens
/// here beyond rejecting a second `video` field; unknown fields are ignored.
async fn collect_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart request: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "video" => {
                if form.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple video files provided".to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_FILENAME)
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read video file: {}", e))
                })?;
                form.file = Some(FilePart {
                    data: data.to_vec(),
                    filename,
                    content_type,
                });
            }
            "title" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read title field: {}", e))
                })?;
                form.title = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Validation order is part of the contract: missing file, then size, then
/// title. A file of exactly `max_file_size` bytes passes.
fn validate(form: UploadForm, max_file_size: usize) -> Result<(FilePart, String), AppError> {
    let file = form
        .file
        .ok_or_else(|| AppError::InvalidInput("No video file provided".to_string()))?;

    if file.data.len() > max_file_size {
        return Err(AppError::PayloadTooLarge(format!(
            "Video is too large. Max size is {}MB.",
            max_file_size / (1024 * 1024)
        )));
    }

    let title = form
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Title is required".to_string()))?;

    Ok((file, title))
}
