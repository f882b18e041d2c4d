//! Application wiring: tracing, database, storage, routes, server.

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use videohub_core::Config;
use videohub_storage::create_storage;

/// Initialize the tracing subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Build the full application: connect the database, construct the storage
/// backend, assemble state and routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let pool = database::setup_database(&config).await?;

    let storage = create_storage(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage backend: {}", e))?;

    let state = Arc::new(AppState::new(config, pool, storage));
    let router = routes::build_router(state.clone())?;

    Ok((state, router))
}
