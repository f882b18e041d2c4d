//! Video catalog handlers. All routes here sit behind the auth middleware.

use crate::auth::CurrentAccount;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    _account: CurrentAccount,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.videos.list().await?;
    Ok(Json(videos))
}

pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    CurrentAccount(account_id): CurrentAccount,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state.uploads.upload(multipart).await?;

    tracing::info!(video_id = %video.id, account_id = %account_id, "Upload recorded");

    Ok((StatusCode::CREATED, Json(video)))
}

pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    CurrentAccount(account_id): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.videos.delete_by_id(id).await?;

    tracing::info!(video_id = %id, account_id = %account_id, "Video deleted");

    Ok(Json(serde_json::json!({ "message": "Video deleted" })))
}
