//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for short URL records.
///
/// Uniqueness of `code` and `url_hash` is enforced by the table constraints.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn find_by_hash(&self, url_hash: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, code, long_url, url_hash, created_at, creator_ip
            FROM short_urls
            WHERE url_hash = $1
            "#,
        )
        .bind(url_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, code, long_url, url_hash, created_at, creator_ip
            FROM short_urls
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn exists_code(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM short_urls WHERE code = $1)",
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let inserted = sqlx::query_as::<_, ShortUrl>(
            r#"
            INSERT INTO short_urls (code, long_url, url_hash, creator_ip)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (url_hash) DO NOTHING
            RETURNING id, code, long_url, url_hash, created_at, creator_ip
            "#,
        )
        .bind(&new_short_url.code)
        .bind(&new_short_url.long_url)
        .bind(&new_short_url.url_hash)
        .bind(&new_short_url.creator_ip)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if let Some(row) = inserted {
            return Ok(row);
        }

        // Lost the race on url_hash; the winner's row is visible now.
        self.find_by_hash(&new_short_url.url_hash)
            .await?
            .ok_or_else(|| {
                AppError::internal(
                    "Short URL vanished after hash conflict",
                    json!({ "url_hash": new_short_url.url_hash }),
                )
            })
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
