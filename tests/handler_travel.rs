mod common;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post, put},
};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use wedding_transport::api::handlers::{
    get_travel_handler, import_travel_handler, list_event_travel_handler, put_travel_handler,
};

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route(
            "/api/guests/{id}/travel",
            put(put_travel_handler).get(get_travel_handler),
        )
        .route("/api/events/{id}/travel", get(list_event_travel_handler))
        .route("/api/events/{id}/travel/import", post(import_travel_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

const CSV_HEADER: &str = "guest_id,transport_mode,arrival_date,arrival_time,arrival_location,flight_number,needs_transportation,flight_status";

// ─── PUT / GET ───────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_put_travel_then_get(pool: PgPool) {
    let event_id = common::create_test_event(&pool, "Travel", None).await;
    let guest_id = common::create_test_guest(&pool, event_id, "Ana").await;
    let server = make_server(pool);

    let response = server
        .put(&format!("/api/guests/{guest_id}/travel"))
        .json(&json!({
            "arrival_date": "2026-06-12",
            "arrival_time": "13:10",
            "arrival_location": "LIS",
            "flight_number": "tp1351",
            "needs_transportation": true,
            "flight_status": "confirmed"
        }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["transport_mode"], "air");
    assert_eq!(body["flight_number"], "TP1351");
    assert_eq!(body["arrival_time"], "13:10");

    let response = server.get(&format!("/api/guests/{guest_id}/travel")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["flight_status"], "confirmed");
}

#[sqlx::test]
async fn test_put_travel_invalid_flight_number(pool: PgPool) {
    let event_id = common::create_test_event(&pool, "Travel", None).await;
    let guest_id = common::create_test_guest(&pool, event_id, "Ana").await;
    let server = make_server(pool);

    let response = server
        .put(&format!("/api/guests/{guest_id}/travel"))
        .json(&json!({ "flight_number": "not a flight" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[sqlx::test]
async fn test_put_travel_invalid_time(pool: PgPool) {
    let event_id = common::create_test_event(&pool, "Travel", None).await;
    let guest_id = common::create_test_guest(&pool, event_id, "Ana").await;
    let server = make_server(pool);

    let response = server
        .put(&format!("/api/guests/{guest_id}/travel"))
        .json(&json!({ "arrival_time": "25:99" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["message"], "Invalid arrival time");
}

#[sqlx::test]
async fn test_put_travel_unknown_guest(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .put("/api/guests/999999/travel")
        .json(&json!({ "arrival_location": "LIS" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn test_get_travel_missing(pool: PgPool) {
    let event_id = common::create_test_event(&pool, "Travel", None).await;
    let guest_id = common::create_test_guest(&pool, event_id, "Ana").await;
    let server = make_server(pool);

    let response = server.get(&format!("/api/guests/{guest_id}/travel")).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "Travel info not found"
    );
}

#[sqlx::test]
async fn test_list_event_travel(pool: PgPool) {
    let event_id = common::create_test_event(&pool, "Travel", None).await;
    common::create_arriving_guest(&pool, event_id, "Ana", "LIS", "2026-06-12", "13:10").await;
    common::create_arriving_guest(&pool, event_id, "Rui", "OPO", "2026-06-12", "09:00").await;
    let server = make_server(pool);

    let response = server.get(&format!("/api/events/{event_id}/travel")).await;

    response.assert_status_ok();

    let items = response.json::<serde_json::Value>()["items"]
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["arrival_location"], "OPO");
}

// ─── CSV IMPORT ──────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_import_reports_per_row_errors(pool: PgPool) {
    let event_id = common::create_test_event(&pool, "Import", None).await;
    let other_event = common::create_test_event(&pool, "Other", None).await;
    let ana = common::create_test_guest(&pool, event_id, "Ana").await;
    let rui = common::create_test_guest(&pool, event_id, "Rui").await;
    let stranger = common::create_test_guest(&pool, other_event, "Stranger").await;
    let server = make_server(pool);

    let csv = format!(
        "{CSV_HEADER}\n\
         {ana},air,2026-06-12,13:10,LIS,TP1351,yes,confirmed\n\
         {rui},,2026-06-12,09:05,LIS,,true,\n\
         {stranger},air,2026-06-12,13:10,LIS,TP1351,yes,confirmed\n\
         999999,air,2026-06-12,13:10,LIS,TP1351,yes,confirmed\n\
         {rui},air,2026-06-12,soon,LIS,TP1351,yes,confirmed\n"
    );

    let response = server
        .post(&format!("/api/events/{event_id}/travel/import"))
        .bytes(csv.into_bytes().into())
        .content_type("text/csv")
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["total"], 5);
    assert_eq!(body["imported"], 2);
    assert_eq!(body["failed"], 3);

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors[0]["row"], 3);
    assert_eq!(errors[0]["guest_id"], stranger);
    assert_eq!(errors[0]["error"]["message"], "Guest belongs to another event");
    assert_eq!(errors[1]["row"], 4);
    assert_eq!(errors[1]["error"]["code"], "not_found");
    assert_eq!(errors[2]["row"], 5);
    assert_eq!(errors[2]["error"]["code"], "validation_error");

    let response = server.get(&format!("/api/guests/{rui}/travel")).await;
    let travel = response.json::<serde_json::Value>();
    assert_eq!(travel["arrival_time"], "09:05");
    assert_eq!(travel["flight_status"], "scheduled");
}

#[sqlx::test]
async fn test_import_missing_columns(pool: PgPool) {
    let event_id = common::create_test_event(&pool, "Import", None).await;
    let server = make_server(pool);

    let response = server
        .post(&format!("/api/events/{event_id}/travel/import"))
        .text("guest_id,arrival_date\n1,2026-06-12\n")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<serde_json::Value>();
    assert!(
        body["error"]["details"]["missing"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c == "arrival_time")
    );
}

#[sqlx::test]
async fn test_import_unknown_event(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/api/events/999999/travel/import")
        .text(format!("{CSV_HEADER}\n"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
