//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /healthz`     - Health check (database)
//! - `GET  /{code}`      - Short link redirect
//! - `/api/links*`       - Link management API
//!
//! Static routes win over `/{code}`, so `/healthz` is never treated as a
//! code. Other reserved words (`api`, `code`, `favicon.ico`, `_next`) do
//! reach the redirect handler, which answers them with 404.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request time limit, 503 with a JSON error body
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{timeout, tracing};
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Default per-request time limit, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout_secs` - upper bound on handler run time
pub fn app_router(state: AppState, request_timeout_secs: u64) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, request_timeout_secs))
}

/// Routes and middleware without trailing-slash normalization.
pub fn router(state: AppState, request_timeout_secs: u64) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::link_routes())
        .with_state(state)
        .layer(timeout::layer(Duration::from_secs(request_timeout_secs)))
        .layer(middleware::map_response(timeout::timeout_body))
        .layer(tracing::layer())
}
