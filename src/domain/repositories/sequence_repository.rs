//! Repository trait for the code sequence counter.

use crate::error::AppError;
use async_trait::async_trait;

/// Durable, monotonic integer source.
///
/// Every call returns a value never handed out before, starting at 1. Values
/// are burned even when the caller discards them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SequenceRepository: Send + Sync {
    /// Allocates the next sequence value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the counter cannot be advanced.
    async fn next_id(&self) -> Result<i64, AppError>;
}
