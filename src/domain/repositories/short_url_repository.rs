//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short URL records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortUrlRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds a record by the hash of its canonical long URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_hash(&self, url_hash: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Finds a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Returns true if a record with this code exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists_code(&self, code: &str) -> Result<bool, AppError>;

    /// Inserts a record unless one with the same `url_hash` already exists.
    ///
    /// When another writer inserted the same hash first, the existing record is
    /// returned instead of an error, so concurrent identical submissions
    /// converge on a single row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already used by a
    /// different URL. Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
