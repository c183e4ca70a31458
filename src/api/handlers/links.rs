//! Handlers for link management endpoints (list, create, get, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

use crate::api::dto::link::{
    CreateLinkRequest, CreatedLinkResponse, DeleteResponse, LinkResponse,
};
use crate::api::extractors::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;

/// Lists every link, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Response
///
/// ```json
/// [
///   {
///     "code": "abc123",
///     "url": "https://example.com",
///     "clicks": 3,
///     "lastClicked": "2025-01-02T10:00:00Z",
///     "createdAt": "2025-01-01T09:00:00Z"
///   }
/// ]
/// ```
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "code": "MyLink1" }
/// ```
///
/// `code` is optional; a random 6-character code is generated without it.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "MyLink1",
///   "url": "https://example.com",
///   "shortUrl": "https://sho.rt/MyLink1",
///   "clicks": 0,
///   "lastClicked": null
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request on malformed body, URL or code
/// - 409 Conflict if the custom code already exists
/// - 500 if no free code could be generated
pub async fn create_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreatedLinkResponse>), AppError> {
    let link = state
        .link_service
        .create_link(payload.url, payload.code)
        .await?;

    let base_url = resolve_base_url(state.base_url.as_deref(), &headers);
    let short_url = state.link_service.short_url(&base_url, &link.code);

    Ok((
        StatusCode::CREATED,
        Json(CreatedLinkResponse {
            code: link.code,
            url: link.url,
            short_url,
            clicks: link.clicks,
            last_clicked: link.last_clicked,
        }),
    ))
}

/// Returns a single link with its statistics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// The row is removed; later lookups and redirects for the code return 404.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteResponse { success: true }))
}
