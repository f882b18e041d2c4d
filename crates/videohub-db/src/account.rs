use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use videohub_core::models::Account;
use videohub_core::AppError;

/// Credential store adapter over the `accounts` table.
///
/// Email uniqueness is enforced by the database; a unique violation on
/// insert is translated into a client-facing duplicate-registration error.
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<Postgres, Account>(
            "SELECT id, name, email, password_hash, created_at FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, AppError> {
        let account = sqlx::query_as::<Postgres, Account>(
            r#"
            INSERT INTO accounts (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, now())
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::InvalidInput("User already exists".to_string())
            }
            other => AppError::Database(other),
        })?;

        tracing::info!(account_id = %account.id, "Account created");

        Ok(account)
    }
}
