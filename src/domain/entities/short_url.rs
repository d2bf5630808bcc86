//! Short URL entity mapping a code to a canonical long URL.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// A stored short URL.
///
/// Records are written once and never updated: `code` and `url_hash` are both
/// unique, so a canonical long URL maps to at most one code.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortUrl {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub url_hash: String,
    pub created_at: DateTime<Utc>,
    pub creator_ip: String,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(
        id: i64,
        code: String,
        long_url: String,
        url_hash: String,
        created_at: DateTime<Utc>,
        creator_ip: String,
    ) -> Self {
        Self {
            id,
            code,
            long_url,
            url_hash,
            created_at,
            creator_ip,
        }
    }
}

/// Input data for inserting a short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub code: String,
    pub long_url: String,
    pub url_hash: String,
    pub creator_ip: String,
}

impl NewShortUrl {
    /// Builds an insert payload, deriving `url_hash` from `long_url`.
    pub fn new(code: String, long_url: String, creator_ip: String) -> Self {
        let url_hash = url_hash(&long_url);
        Self {
            code,
            long_url,
            url_hash,
            creator_ip,
        }
    }
}

/// Content hash used to deduplicate long URLs (lowercase hex SHA-256).
pub fn url_hash(long_url: &str) -> String {
    hex::encode(Sha256::digest(long_url.as_bytes()))
}
