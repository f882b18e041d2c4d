//! Video API integration tests.
//!
//! Run with: `cargo test -p videohub-api --test videos_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::auth::{register_and_login, TEST_EMAIL, TEST_NAME, TEST_PASSWORD};
use helpers::{setup_test_app, TEST_MAX_VIDEO_SIZE};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::time::Duration;

fn video_form(title: &str, filename: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "video",
            Part::bytes(data).file_name(filename).mime_type("video/mp4"),
        )
        .add_text("title", title)
}

#[tokio::test]
async fn test_register_login_and_empty_list() {
    let app = setup_test_app().await;
    let token = register_and_login(app.client()).await;

    let response = app
        .client()
        .get("/videos")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    assert_eq!(response.status_code(), 200);
    let videos: Vec<serde_json::Value> = response.json();
    assert!(videos.is_empty());
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/register")
        .json(&json!({ "name": TEST_NAME, "email": TEST_EMAIL }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let app = setup_test_app().await;

    let payload = json!({
        "name": TEST_NAME,
        "email": TEST_EMAIL,
        "password": TEST_PASSWORD,
    });

    let response = app.client().post("/register").json(&payload).await;
    assert_eq!(response.status_code(), 201);

    let response = app.client().post("/register").json(&payload).await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = setup_test_app().await;
    register_and_login(app.client()).await;

    let unknown_email = app
        .client()
        .post("/login")
        .json(&json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }))
        .await;
    let wrong_password = app
        .client()
        .post("/login")
        .json(&json!({ "email": TEST_EMAIL, "password": "wrong password" }))
        .await;

    assert_eq!(unknown_email.status_code(), 400);
    assert_eq!(wrong_password.status_code(), 400);

    let a: serde_json::Value = unknown_email.json();
    let b: serde_json::Value = wrong_password.json();
    assert_eq!(a["message"], "Invalid credentials");
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_login_missing_credentials() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/login")
        .json(&json!({ "email": TEST_EMAIL }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Missing credentials");
}

#[tokio::test]
async fn test_videos_require_token() {
    let app = setup_test_app().await;

    let response = app.client().get("/videos").await;
    assert_eq!(response.status_code(), 401);

    let response = app
        .client()
        .get("/videos")
        .add_header("Authorization", "Bearer not-a-real-token")
        .await;
    assert_eq!(response.status_code(), 401);

    let response = app
        .client()
        .post("/videos/upload")
        .multipart(video_form("Untitled", "clip.mp4", b"data".to_vec()))
        .await;
    assert_eq!(response.status_code(), 401);
    assert_eq!(app.storage_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upload_without_file() {
    let app = setup_test_app().await;
    let token = register_and_login(app.client()).await;

    let response = app
        .client()
        .post("/videos/upload")
        .add_header("Authorization", format!("Bearer {}", token))
        .multipart(MultipartForm::new().add_text("title", "No file here"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "No video file provided");
    assert_eq!(app.storage_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upload_without_title() {
    let app = setup_test_app().await;
    let token = register_and_login(app.client()).await;

    let form = MultipartForm::new().add_part(
        "video",
        Part::bytes(b"video bytes".to_vec())
            .file_name("clip.mp4")
            .mime_type("video/mp4"),
    );
    let response = app
        .client()
        .post("/videos/upload")
        .add_header("Authorization", format!("Bearer {}", token))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Title is required");
    assert_eq!(app.storage_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upload_size_boundary() {
    let app = setup_test_app().await;
    let token = register_and_login(app.client()).await;

    // Exactly at the limit: accepted.
    let response = app
        .client()
        .post("/videos/upload")
        .add_header("Authorization", format!("Bearer {}", token))
        .multipart(video_form(
            "At the limit",
            "limit.mp4",
            vec![0u8; TEST_MAX_VIDEO_SIZE],
        ))
        .await;
    assert_eq!(response.status_code(), 201);
    assert_eq!(app.storage_calls.load(Ordering::SeqCst), 1);

    // One byte over: rejected before the backend is touched.
    let response = app
        .client()
        .post("/videos/upload")
        .add_header("Authorization", format!("Bearer {}", token))
        .multipart(video_form(
            "Over the limit",
            "over.mp4",
            vec![0u8; TEST_MAX_VIDEO_SIZE + 1],
        ))
        .await;
    assert_eq!(response.status_code(), 413);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Video is too large. Max size is 1MB.");
    assert_eq!(app.storage_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_upload_and_list_newest_first() {
    let app = setup_test_app().await;
    let token = register_and_login(app.client()).await;

    for title in ["First clip", "Second clip"] {
        let response = app
            .client()
            .post("/videos/upload")
            .add_header("Authorization", format!("Bearer {}", token))
            .multipart(video_form(title, "clip.mp4", b"video bytes".to_vec()))
            .await;
        assert_eq!(response.status_code(), 201);
        // Distinct created_at timestamps for deterministic ordering.
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let response = app
        .client()
        .get("/videos")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    assert_eq!(response.status_code(), 200);

    let videos: Vec<serde_json::Value> = response.json();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0]["title"], "Second clip");
    assert_eq!(videos[1]["title"], "First clip");

    // Stored file exists and the URL points at the static mount.
    let url = videos[0]["video_url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));
    let stored_name = videos[0]["filename"].as_str().unwrap();
    assert!(app.upload_dir.path().join(stored_name).exists());
}

#[tokio::test]
async fn test_upload_response_contains_record() {
    let app = setup_test_app().await;
    let token = register_and_login(app.client()).await;

    let response = app
        .client()
        .post("/videos/upload")
        .add_header("Authorization", format!("Bearer {}", token))
        .multipart(video_form("My clip", "my clip (final).mp4", b"abc".to_vec()))
        .await;

    assert_eq!(response.status_code(), 201);
    let video: serde_json::Value = response.json();
    assert_eq!(video["title"], "My clip");
    assert!(video["id"].as_str().is_some());
    // Original name survives sanitized inside the stored name.
    assert!(video["filename"]
        .as_str()
        .unwrap()
        .ends_with("my_clip__final_.mp4"));
}

#[tokio::test]
async fn test_delete_video() {
    let app = setup_test_app().await;
    let token = register_and_login(app.client()).await;

    let response = app
        .client()
        .post("/videos/upload")
        .add_header("Authorization", format!("Bearer {}", token))
        .multipart(video_form("Short lived", "clip.mp4", b"abc".to_vec()))
        .await;
    assert_eq!(response.status_code(), 201);
    let video: serde_json::Value = response.json();
    let id = video["id"].as_str().unwrap();

    let response = app
        .client()
        .delete(&format!("/videos/{}", id))
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Video deleted");

    let response = app
        .client()
        .get("/videos")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    let videos: Vec<serde_json::Value> = response.json();
    assert!(videos.is_empty());
}

#[tokio::test]
async fn test_delete_nonexistent_video_is_ok() {
    let app = setup_test_app().await;
    let token = register_and_login(app.client()).await;

    let response = app
        .client()
        .delete(&format!("/videos/{}", uuid::Uuid::new_v4()))
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Video deleted");
}

#[tokio::test]
async fn test_health_and_root() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"], "connected");
    assert!(body["timestamp"].as_str().is_some());

    let response = app.client().get("/").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "VideoHub backend is running");
}
