//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Body of `POST /api/links`.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    /// Target URL; must be an absolute HTTP(S) URL.
    pub url: String,

    /// Optional custom code, 6-8 alphanumeric characters.
    #[serde(default)]
    pub code: Option<String>,
}

/// Full link record as returned by list and get.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub url: String,
    pub clicks: i32,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            url: link.url,
            clicks: link.clicks,
            last_clicked: link.last_clicked,
            created_at: link.created_at,
        }
    }
}

/// Response of `POST /api/links`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLinkResponse {
    pub code: String,
    pub url: String,
    pub short_url: String,
    pub clicks: i32,
    pub last_clicked: Option<DateTime<Utc>>,
}

/// Response of `DELETE /api/links/{code}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
