//! Handler for short URL redirect.

use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::target::{split_code_path, target_url};

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /{code}[/{extra path}][?{query}]`
///
/// Mounted as the router fallback so any extra path after the code is kept.
/// The extra path and the query string are appended to the stored URL.
///
/// # Request Flow
///
/// 1. Split the path into code and extra path
/// 2. Look up the long URL in the cache, then the store
/// 3. On a store hit, write the mapping to the cache in the background
/// 4. Optionally re-run the spam check on the target host
/// 5. Return 301 Moved Permanently
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
/// Returns 410 Gone if rechecking is enabled and the target is now listed.
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, AppError> {
    let (code, rest) = split_code_path(uri.path());
    let long_url = lookup_long_url(&state, code).await?;

    if state.recheck_on_redirect && state.short_url_service.target_is_spam(&long_url).await {
        metrics::counter!("redirects_refused_total").increment(1);
        return Err(AppError::gone(
            "Target is listed as spam",
            json!({ "code": code }),
        ));
    }

    let target = target_url(&long_url, rest, uri.query());
    metrics::counter!("redirects_total").increment(1);

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response())
}

/// Resolves `code` through the cache, falling back to the store.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if the code is empty or unknown.
pub(crate) async fn lookup_long_url(state: &AppState, code: &str) -> Result<String, AppError> {
    if code.is_empty() {
        return Err(AppError::not_found("Code not found", json!({ "code": code })));
    }

    if let Some(long_url) = state.cache.get_long_url(code).await {
        debug!(code, "cache hit");
        return Ok(long_url);
    }

    let record = state.short_url_service.resolve(code).await?;

    let cache = state.cache.clone();
    let cached_code = record.code.clone();
    let cached_url = record.long_url.clone();
    tokio::spawn(async move {
        cache.put_long_url(&cached_code, &cached_url).await;
    });

    Ok(record.long_url)
}
