//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reserved paths (`api`, `code`, `healthz`, `favicon.ico`, `_next`)
///    return 404 without touching the database
/// 2. Click count and last-click time are updated in one statement that
///    also returns the target URL
/// 3. Respond with 302 Found
///
/// # Errors
///
/// Returns 404 Not Found for reserved or unknown codes.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let url = state.link_service.follow(&code).await?;

    debug!(code, url, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]))
}
