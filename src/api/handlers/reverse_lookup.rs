//! Handler for reverse lookup of a short code.

use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};

use crate::api::handlers::redirect::lookup_long_url;
use crate::state::AppState;
use crate::utils::target::{split_code_path, target_url};

/// Path prefix of this route inside the nested API router.
const ROUTE_PREFIX: &str = "/reverselookup";

/// Answers with the URL a short link would redirect to, as plain text.
///
/// # Endpoint
///
/// `GET /api/reverselookup/{code}[/{extra path}][?{query}]`
///
/// # Response Codes
///
/// - **200 OK**: target URL in the body
/// - **404 Not Found**: `Code not found`
///
/// The code and extra path are taken from the raw request path, so the answer
/// is byte-for-byte the `Location` the redirect would send.
pub async fn reverse_lookup_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    let (code, rest) = split_code_path(path.strip_prefix(ROUTE_PREFIX).unwrap_or(path));

    let (status, body) = match lookup_long_url(&state, code).await {
        Ok(long_url) => (StatusCode::OK, target_url(&long_url, rest, uri.query())),
        Err(err) => (err.status(), err.to_string()),
    };

    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
