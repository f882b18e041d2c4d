//! Registration and login handlers.
//!
//! Login failures are deliberately indistinguishable: an unknown email and a
//! wrong password return the same status and message, so responses cannot be
//! used to probe which addresses are registered.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use videohub_core::models::AccountResponse;
use videohub_core::AppError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AccountResponse,
}

fn invalid_credentials() -> HttpAppError {
    HttpAppError(AppError::InvalidInput("Invalid credentials".to_string()))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let name = request.name.trim().to_string();
    let email = request.email.trim().to_lowercase();
    let password = request.password;

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(HttpAppError(AppError::InvalidInput(
            "All fields are required".to_string(),
        )));
    }

    // bcrypt is CPU-bound; keep it off the async executor.
    let password_hash = tokio::task::spawn_blocking(move || {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
    .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let account = state.accounts.create(&name, &email, &password_hash).await?;

    tracing::info!(account_id = %account.id, "Registration completed");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Registered successfully" })),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let email = request.email.trim().to_lowercase();
    let password = request.password;

    if email.is_empty() || password.is_empty() {
        return Err(HttpAppError(AppError::InvalidInput(
            "Missing credentials".to_string(),
        )));
    }

    let account = state
        .accounts
        .find_by_email(&email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let hash = account.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))?;

    if !matches {
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(account.id)?;

    tracing::info!(account_id = %account.id, "Login successful");

    Ok(Json(LoginResponse {
        token,
        user: account.into(),
    }))
}
