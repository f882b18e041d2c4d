//! Shared application state, built once at startup.

use crate::auth::TokenService;
use crate::services::VideoUploadService;
use sqlx::PgPool;
use std::sync::Arc;
use videohub_core::Config;
use videohub_db::{AccountRepository, VideoRepository};
use videohub_storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub accounts: AccountRepository,
    pub videos: VideoRepository,
    pub storage: Arc<dyn Storage>,
    pub tokens: Arc<TokenService>,
    pub uploads: VideoUploadService,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool, storage: Arc<dyn Storage>) -> Self {
        let accounts = AccountRepository::new(pool.clone());
        let videos = VideoRepository::new(pool.clone());
        let tokens = Arc::new(TokenService::new(
            &config.jwt_secret,
            config.jwt_expiry_hours,
        ));
        let uploads = VideoUploadService::new(
            storage.clone(),
            videos.clone(),
            config.max_video_size_bytes,
        );

        Self {
            config,
            pool,
            accounts,
            videos,
            storage,
            tokens,
            uploads,
        }
    }
}
