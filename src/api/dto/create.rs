//! Query parameters of the plaintext creation endpoint.

use serde::Deserialize;

/// `GET /api/create?url=..&code=..`
#[derive(Debug, Deserialize)]
pub struct CreateQuery {
    pub url: Option<String>,
    /// Optional custom code.
    pub code: Option<String>,
}
