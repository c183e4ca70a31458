//! Request timeout middleware.

use std::time::Duration;

use axum::{
    body::HttpBody,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_http::timeout::TimeoutLayer;

use crate::error::AppError;

/// Status tower-http answers with once a request runs past its limit.
const TIMEOUT_STATUS: StatusCode = StatusCode::SERVICE_UNAVAILABLE;

/// Aborts requests that run longer than `timeout`.
///
/// The layer itself replies with an empty 503; pair it with
/// [`timeout_body`] to get the usual JSON error body.
pub fn layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(TIMEOUT_STATUS, timeout)
}

/// Fills the empty timeout response with `{"error": "Request timed out"}`.
///
/// Handler-produced 503s (the degraded health check) always carry a body
/// and pass through untouched.
pub async fn timeout_body(response: Response) -> Response {
    if response.status() == TIMEOUT_STATUS && response.body().size_hint().exact() == Some(0) {
        return AppError::Timeout.into_response();
    }

    response
}
