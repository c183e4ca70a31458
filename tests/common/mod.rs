#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tinylink::application::services::LinkService;
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::routes::{DEFAULT_REQUEST_TIMEOUT_SECS, router};
use tinylink::state::AppState;

/// Stored counters for a link, read straight from the table.
#[derive(Debug, sqlx::FromRow)]
pub struct Counters {
    pub clicks: i32,
    pub last_clicked: Option<DateTime<Utc>>,
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO links (code, url) VALUES ($1, $2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_link_at(pool: &PgPool, code: &str, url: &str, created_at: DateTime<Utc>) {
    sqlx::query("INSERT INTO links (code, url, created_at) VALUES ($1, $2, $3)")
        .bind(code)
        .bind(url)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn counters(pool: &PgPool, code: &str) -> Option<Counters> {
    sqlx::query_as::<_, Counters>("SELECT clicks, last_clicked FROM links WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool, base_url: Option<&str>) -> AppState {
    let link_repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let link_service = Arc::new(LinkService::new(link_repo));

    AppState::new(link_service, base_url.map(str::to_string))
}

pub fn create_test_app(pool: PgPool) -> Router {
    router(create_test_state(pool, None), DEFAULT_REQUEST_TIMEOUT_SECS)
}

pub fn create_test_server(pool: PgPool) -> TestServer {
    TestServer::new(create_test_app(pool)).unwrap()
}
