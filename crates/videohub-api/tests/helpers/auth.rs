//! Auth helpers for integration tests.

use axum_test::TestServer;
use serde_json::json;

pub const TEST_NAME: &str = "Test Account";
pub const TEST_EMAIL: &str = "test@example.com";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Register the default test account and return a bearer token for it.
pub async fn register_and_login(server: &TestServer) -> String {
    let response = server
        .post("/register")
        .json(&json!({
            "name": TEST_NAME,
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = server
        .post("/login")
        .json(&json!({
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    body["token"].as_str().expect("token in response").to_string()
}
