//! Route assembly and HTTP-level middleware.

use crate::auth::middleware::auth_middleware;
use crate::handlers::{auth, health, videos};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use videohub_core::{Config, StorageBackend};

/// Extra headroom over the pipeline's file limit so multipart framing and the
/// title field don't trip the transport-level body cap. A file at exactly the
/// limit must reach the pipeline, which produces the client-facing 413.
const BODY_LIMIT_SLACK_BYTES: usize = 1024 * 1024;

/// Setup all application routes
pub fn build_router(state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(&state.config)?;

    let protected = Router::new()
        .route("/videos", get(videos::list_videos))
        .route("/videos/upload", post(videos::upload_video))
        .route("/videos/{id}", delete(videos::delete_video))
        .layer(axum::middleware::from_fn_with_state(
            state.tokens.clone(),
            auth_middleware,
        ));

    let mut app = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(protected)
        .with_state(state.clone());

    // Local backend: serve the upload directory statically.
    if state.storage.backend_type() == StorageBackend::Local {
        app = app.nest_service("/uploads", ServeDir::new(&state.config.upload_dir));
    }

    let app = app
        .layer(RequestBodyLimitLayer::new(
            state.config.max_video_size_bytes + BODY_LIMIT_SLACK_BYTES,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
