mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use wedding_transport::api::handlers::health_handler;

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_health_all_probes_pass(pool: PgPool) {
    let server = make_server(pool);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["lock"]["status"], "ok");
    assert_eq!(json["checks"]["lock"]["message"], "local backend reachable");
}

#[sqlx::test]
async fn test_health_reports_crate_version(pool: PgPool) {
    let server = make_server(pool);

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["message"], "connected");
}
