//! Configuration module
//!
//! All environment lookups happen here, once, at startup. The rest of the
//! application receives an immutable `Config`.

use std::env;

use crate::storage_types::StorageBackend;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const MAX_VIDEO_SIZE_MB: usize = 100;
const CLOUD_UPLOAD_TIMEOUT_SECS: u64 = 60;
const DEFAULT_PORT: &str = "5000";

/// Development-only fallback signing secret. Startup refuses to use it in
/// production; see `Config::from_env`.
const DEV_JWT_SECRET: &str = "videohub-development-secret-do-not-use-in-prod";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub environment: String,
    pub max_video_size_bytes: usize,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub upload_dir: String,
    pub upload_base_url: String,
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_upload_preset: Option<String>,
    pub cloud_upload_timeout_secs: u64,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "development".to_string());
        let is_production = {
            let env = environment.to_lowercase();
            env == "production" || env == "prod"
        };

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if is_production => {
                return Err(anyhow::anyhow!(
                    "JWT_SECRET must be set when running in production"
                ));
            }
            Err(_) => {
                tracing::warn!("JWT_SECRET not set, using development fallback secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let explicit_backend =
            env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|s| match s.to_lowercase().as_str() {
                    "local" => Some(StorageBackend::Local),
                    "cloud" => Some(StorageBackend::Cloud),
                    _ => None,
                });
        let storage_backend = resolve_storage_backend(
            explicit_backend,
            env::var("VERCEL").map(|v| v == "1").unwrap_or(false),
            env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok(),
            is_production,
        );

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            environment,
            max_video_size_bytes: env::var("MAX_VIDEO_SIZE_MB")
                .unwrap_or_else(|_| MAX_VIDEO_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_VIDEO_SIZE_MB)
                * 1024
                * 1024,
            storage_backend,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            upload_base_url: env::var("UPLOAD_BASE_URL")
                .unwrap_or_else(|_| "/uploads".to_string()),
            cloudinary_cloud_name: env::var("CLOUDINARY_CLOUD_NAME")
                .ok()
                .filter(|s| !s.is_empty()),
            cloudinary_upload_preset: env::var("CLOUDINARY_UPLOAD_PRESET")
                .ok()
                .filter(|s| !s.is_empty()),
            cloud_upload_timeout_secs: env::var("CLOUD_UPLOAD_TIMEOUT_SECS")
                .unwrap_or_else(|_| CLOUD_UPLOAD_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CLOUD_UPLOAD_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if self.is_production() {
            if self.jwt_secret == DEV_JWT_SECRET {
                return Err(anyhow::anyhow!(
                    "JWT_SECRET must be set when running in production"
                ));
            }
            if self.cors_origins.iter().any(|o| o == "*") {
                return Err(anyhow::anyhow!(
                    "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
                ));
            }
        }

        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_VIDEO_SIZE_MB must be greater than 0"));
        }

        Ok(())
    }

    pub fn max_video_size_mb(&self) -> usize {
        self.max_video_size_bytes / (1024 * 1024)
    }
}

/// Storage backend selection. An explicit `STORAGE_BACKEND` wins; otherwise
/// serverless signals (Vercel, Lambda) or a production environment select the
/// cloud backend, and everything else gets local disk.
pub fn resolve_storage_backend(
    explicit: Option<StorageBackend>,
    vercel: bool,
    lambda: bool,
    production: bool,
) -> StorageBackend {
    if let Some(backend) = explicit {
        return backend;
    }
    if vercel || lambda || production {
        StorageBackend::Cloud
    } else {
        StorageBackend::Local
    }
}
