mod common;

use serde_json::Value;
use sqlx::PgPool;

#[sqlx::test]
async fn test_health_endpoint_success(pool: PgPool) {
    let server = common::create_test_server(pool);

    let response = server.get("/healthz").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[sqlx::test]
async fn test_health_endpoint_degraded_when_pool_closed(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    pool.close().await;

    let response = server.get("/healthz").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
    assert_eq!(json["checks"]["database"]["message"], "Database unreachable");
}

#[sqlx::test]
async fn test_database_failure_is_generic_500(pool: PgPool) {
    let server = common::create_test_server(pool.clone());
    pool.close().await;

    let response = server.get("/api/links").await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], "Internal server error");
}
