//! Handler for the JSON shortening endpoint.

use axum::{
    Json,
    extract::{ConnectInfo, State},
};
use std::net::SocketAddr;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page", "alias": "my-page" }
/// ```
///
/// `alias` is optional. Submitting a URL that is already stored returns its
/// existing code.
///
/// # Response
///
/// ```json
/// {
///   "code": "-L",
///   "short_url": "http://localhost:3000/-L",
///   "long_url": "https://example.com/page"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body or alias fails validation
/// - 403 if the URL or the creator IP is rejected
/// - 409 if the alias is taken
pub async fn shorten_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let creator_ip = addr.ip().to_string();
    let record = state
        .short_url_service
        .create(&payload.url, payload.alias.as_deref(), &creator_ip)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: state.short_url(&record.code),
        code: record.code,
        long_url: record.long_url,
    }))
}
