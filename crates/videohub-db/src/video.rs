use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use videohub_core::models::{NewVideo, Video};
use videohub_core::AppError;

/// Asset catalog over the `videos` table.
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a catalog record for a file the storage backend has already
    /// accepted. Id and timestamp are assigned here.
    pub async fn create(&self, new_video: NewVideo) -> Result<Video, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(
            r#"
            INSERT INTO videos (id, title, filename, video_url, created_at)
            VALUES ($1, $2, $3, $4, now())
            RETURNING id, title, filename, video_url, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_video.title)
        .bind(&new_video.filename)
        .bind(&new_video.video_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    /// All videos, newest first.
    pub async fn list(&self) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<Postgres, Video>(
            r#"
            SELECT id, title, filename, video_url, created_at
            FROM videos
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    /// Delete by id. Deleting an absent id is not an error; the outcome is
    /// the same either way.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(video_id = %id, "Delete requested for unknown video");
        }

        Ok(())
    }
}
