//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`         - Health check: store and cache
//! - `/api/*`               - Creation and reverse lookup
//! - `GET  /{code}[/...]`   - Short link redirect (router fallback)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// Redirects are served by the fallback so that `/{code}`, `/{code}/` and
/// `/{code}/any/extra/path` all reach the same handler. Trailing slashes are
/// significant and left untouched.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}
