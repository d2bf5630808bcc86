//! Short code allocation from the sequence counter.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::repositories::{SequenceRepository, ShortUrlRepository};
use crate::error::AppError;
use crate::utils::alias::is_reserved;
use crate::utils::numeral::encode;

/// Default cap on sequence values drawn for a single code.
pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

/// Turns fresh sequence values into unused short codes.
///
/// Each attempt burns one counter value. A value whose code is reserved or
/// already taken (for example by a custom alias) is skipped for good.
pub struct SequenceAllocator {
    sequence_repository: Arc<dyn SequenceRepository>,
    short_url_repository: Arc<dyn ShortUrlRepository>,
    max_attempts: usize,
}

impl SequenceAllocator {
    pub fn new(
        sequence_repository: Arc<dyn SequenceRepository>,
        short_url_repository: Arc<dyn ShortUrlRepository>,
        max_attempts: usize,
    ) -> Self {
        Self {
            sequence_repository,
            short_url_repository,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Allocates the next free code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the counter or the store fails, or
    /// with reason `counter_exhausted` if `max_attempts` values in a row
    /// collided.
    pub async fn next_code(&self) -> Result<String, AppError> {
        for _ in 0..self.max_attempts {
            let id = self.sequence_repository.next_id().await?;
            let id = u64::try_from(id).map_err(|_| {
                AppError::internal(
                    "Sequence returned a negative value",
                    json!({ "reason": "invalid_sequence_value", "value": id }),
                )
            })?;

            let code = encode(id);

            if is_reserved(&code) {
                debug!(id, code = %code, "skipping reserved code");
                continue;
            }

            if self.short_url_repository.exists_code(&code).await? {
                debug!(id, code = %code, "skipping code already in use");
                continue;
            }

            return Ok(code);
        }

        Err(AppError::internal(
            "Failed to allocate a unique code",
            json!({ "reason": "counter_exhausted", "attempts": self.max_attempts }),
        ))
    }
}
