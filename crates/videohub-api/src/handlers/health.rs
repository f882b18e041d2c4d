//! Health check and liveness handlers.

use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

/// Plain-text liveness banner at the root path.
pub async fn root() -> &'static str {
    "VideoHub backend is running"
}

/// Health check: process status plus database connectivity.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let database = match tokio::time::timeout(
        TIMEOUT,
        sqlx::query("SELECT 1").execute(&state.pool),
    )
    .await
    {
        Ok(Ok(_)) => "connected",
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database health check failed");
            "disconnected"
        }
        Err(_) => {
            tracing::error!("Database health check timed out");
            "disconnected"
        }
    };

    Json(serde_json::json!({
        "status": "OK",
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
