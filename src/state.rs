//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::PgLinkRepository;

/// Link service backed by PostgreSQL.
pub type AppLinkService = LinkService<PgLinkRepository>;

/// Handler state. Cheap to clone; the service is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    /// Explicit base URL for short links; derived from the request when `None`.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(link_service: Arc<AppLinkService>, base_url: Option<String>) -> Self {
        Self {
            link_service,
            base_url,
        }
    }
}
