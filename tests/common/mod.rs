#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use wedding_transport::application::services::hash_token;
use wedding_transport::infrastructure::lock::LocalLock;
use wedding_transport::state::AppState;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

pub async fn create_test_event(pool: &PgPool, name: &str, buffer: Option<&str>) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO wedding_events (name, location, hotel_name, transport_buffer_time)
        VALUES ($1, 'Sintra', 'Tivoli Palácio de Seteais', $2)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(buffer)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_guest(pool: &PgPool, event_id: i64, first_name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO guests (event_id, first_name, last_name) VALUES ($1, $2, 'Guest') RETURNING id",
    )
    .bind(event_id)
    .bind(first_name)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts an air travel record that qualifies for generation.
pub async fn create_confirmed_arrival(
    pool: &PgPool,
    guest_id: i64,
    location: &str,
    date: &str,
    time: &str,
) {
    create_test_travel(pool, guest_id, location, date, time, "confirmed").await;
}

pub async fn create_test_travel(
    pool: &PgPool,
    guest_id: i64,
    location: &str,
    date: &str,
    time: &str,
    flight_status: &str,
) {
    sqlx::query(
        r#"
        INSERT INTO travel_info
            (guest_id, transport_mode, arrival_date, arrival_time, arrival_location,
             flight_number, needs_transportation, flight_status)
        VALUES ($1, 'air', $2::date, $3::time, $4, 'TP1351', TRUE, $5)
        "#,
    )
    .bind(guest_id)
    .bind(date)
    .bind(time)
    .bind(location)
    .bind(flight_status)
    .execute(pool)
    .await
    .unwrap();
}

/// Guest with a confirmed arrival, returning the guest ID.
pub async fn create_arriving_guest(
    pool: &PgPool,
    event_id: i64,
    first_name: &str,
    location: &str,
    date: &str,
    time: &str,
) -> i64 {
    let guest_id = create_test_guest(pool, event_id, first_name).await;
    create_confirmed_arrival(pool, guest_id, location, date, time).await;
    guest_id
}

pub async fn create_test_token(pool: &PgPool, name: &str, token: &str) {
    sqlx::query("INSERT INTO api_tokens (name, token_hash) VALUES ($1, $2)")
        .bind(name)
        .bind(hash_token(TEST_SIGNING_SECRET, token))
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_groups(pool: &PgPool, event_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM transport_groups WHERE event_id = $1")
        .bind(event_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_allocations(pool: &PgPool, event_id: i64) -> i64 {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM transport_allocations a
        JOIN transport_groups g ON g.id = a.transport_group_id
        WHERE g.event_id = $1
        "#,
    )
    .bind(event_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(pool),
        Arc::new(LocalLock::default()),
        TEST_SIGNING_SECRET.to_string(),
    )
}
