use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalogued video asset. `filename` is the backend's stored name or key;
/// `video_url` is where the bytes can be fetched, regardless of backend.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub filename: String,
    pub video_url: String,
    pub created_at: DateTime<Utc>,
}

/// Metadata for a video whose bytes were just accepted by the storage
/// backend, ready to be inserted into the catalog.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub filename: String,
    pub video_url: String,
}
