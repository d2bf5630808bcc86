//! API route configuration.

use crate::api::handlers::{create_handler, reverse_lookup_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `GET  /create?url=..&code=..`                 - Plaintext creation
/// - `POST /shorten`                               - JSON creation
/// - `GET  /reverselookup/{code}[/{extra path}]`   - Plaintext target lookup
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/create", get(create_handler))
        .route("/shorten", post(shorten_handler))
        .route("/reverselookup/{*path}", get(reverse_lookup_handler))
}
