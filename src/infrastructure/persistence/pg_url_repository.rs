//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for URL records.
///
/// Ids come from the `urls.id` BIGSERIAL, so they are assigned once, at insert,
/// and increase monotonically.
pub struct PgUrlRepository {
    pool: PgPool,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create_url(&self, original_url: &str) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO urls (original_url) VALUES ($1) RETURNING id",
        )
        .bind(original_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_short_code(&self, id: i64, short_code: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE urls SET short_code = $1 WHERE id = $2")
            .bind(short_code)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::dependency(format!("URL record {id} disappeared")));
        }

        Ok(())
    }

    async fn get_url_by_short_code(&self, short_code: &str) -> Result<Option<String>, AppError> {
        let url = sqlx::query_scalar::<_, String>(
            "SELECT original_url FROM urls WHERE short_code = $1",
        )
        .bind(short_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(url)
    }

    async fn delete_url(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
