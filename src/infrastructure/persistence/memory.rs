//! Process-local repository implementations.
//!
//! Used by the test suites and for running the service without a database.
//! State lives behind a single [`Mutex`] per repository and is never held
//! across an await point.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{SequenceRepository, ShortUrlRepository};
use crate::error::AppError;

#[derive(Default)]
struct Records {
    by_code: HashMap<String, ShortUrl>,
    code_by_hash: HashMap<String, String>,
    last_id: i64,
}

/// In-memory short URL store with the same uniqueness rules as the
/// PostgreSQL table.
#[derive(Default)]
pub struct InMemoryShortUrlRepository {
    records: Mutex<Records>,
}

impl InMemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Records>, AppError> {
        self.records
            .lock()
            .map_err(|_| AppError::internal("Store lock poisoned", json!({})))
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn find_by_hash(&self, url_hash: &str) -> Result<Option<ShortUrl>, AppError> {
        let records = self.lock()?;
        Ok(records
            .code_by_hash
            .get(url_hash)
            .and_then(|code| records.by_code.get(code))
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        Ok(self.lock()?.by_code.get(code).cloned())
    }

    async fn exists_code(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.lock()?.by_code.contains_key(code))
    }

    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut records = self.lock()?;

        if let Some(existing) = records
            .code_by_hash
            .get(&new_short_url.url_hash)
            .and_then(|code| records.by_code.get(code))
        {
            return Ok(existing.clone());
        }

        if records.by_code.contains_key(&new_short_url.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "short_urls_code_key" }),
            ));
        }

        records.last_id += 1;
        let record = ShortUrl::new(
            records.last_id,
            new_short_url.code,
            new_short_url.long_url,
            new_short_url.url_hash,
            Utc::now(),
            new_short_url.creator_ip,
        );

        records
            .code_by_hash
            .insert(record.url_hash.clone(), record.code.clone());
        records.by_code.insert(record.code.clone(), record.clone());

        Ok(record)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.by_code.len() as i64)
    }
}

/// In-memory counter starting at 1.
pub struct InMemorySequenceRepository {
    next: AtomicI64,
}

impl InMemorySequenceRepository {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Counter whose first value is `first`.
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }
}

impl Default for InMemorySequenceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SequenceRepository for InMemorySequenceRepository {
    async fn next_id(&self) -> Result<i64, AppError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(code: &str, url: &str) -> NewShortUrl {
        NewShortUrl::new(code.to_string(), url.to_string(), "127.0.0.1".to_string())
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryShortUrlRepository::new();
        let created = repo
            .insert(new_record("abc", "https://example.com/"))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(repo.find_by_code("abc").await.unwrap(), Some(created.clone()));
        assert_eq!(
            repo.find_by_hash(&created.url_hash).await.unwrap(),
            Some(created)
        );
        assert!(repo.exists_code("abc").await.unwrap());
        assert!(!repo.exists_code("abd").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_same_hash_returns_existing() {
        let repo = InMemoryShortUrlRepository::new();
        let first = repo
            .insert(new_record("one", "https://example.com/"))
            .await
            .unwrap();
        let second = repo
            .insert(new_record("two", "https://example.com/"))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(!repo.exists_code("two").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_code_clash_is_conflict() {
        let repo = InMemoryShortUrlRepository::new();
        repo.insert(new_record("same", "https://a.example/"))
            .await
            .unwrap();

        let err = repo
            .insert(new_record("same", "https://b.example/"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_sequence_starts_at_one_and_increments() {
        let counter = InMemorySequenceRepository::new();
        assert_eq!(counter.next_id().await.unwrap(), 1);
        assert_eq!(counter.next_id().await.unwrap(), 2);

        let counter = InMemorySequenceRepository::starting_at(100);
        assert_eq!(counter.next_id().await.unwrap(), 100);
    }
}
