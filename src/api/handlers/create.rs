//! Handler for the plaintext creation endpoint.

use axum::{
    extract::{ConnectInfo, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::api::dto::create::CreateQuery;
use crate::state::AppState;

/// Creates (or looks up) a short URL and answers with it as plain text.
///
/// # Endpoint
///
/// `GET /api/create?url={long_url}[&code={alias}]`
///
/// Suited to bookmarklets and shell scripts: the body is the bare short URL
/// on success and the human-readable reason otherwise.
///
/// # Response Codes
///
/// - **200 OK**: short URL in the body
/// - **403 Forbidden**: no URL given, URL rejected, or creator IP listed
/// - **400 / 409**: malformed or taken alias
pub async fn create_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(query): Query<CreateQuery>,
) -> Response {
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        return plain(StatusCode::FORBIDDEN, "No url given!".to_string());
    };

    let creator_ip = addr.ip().to_string();

    match state
        .short_url_service
        .create(&url, query.code.as_deref(), &creator_ip)
        .await
    {
        Ok(record) => plain(StatusCode::OK, state.short_url(&record.code)),
        Err(err) => plain(err.status(), err.to_string()),
    }
}

fn plain(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
