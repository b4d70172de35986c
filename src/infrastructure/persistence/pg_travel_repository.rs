//! PostgreSQL implementation of travel repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use super::decode_enum;
use crate::domain::entities::{
    FlightStatus, GuestTravelRecord, NewTravelInfo, TransportMode, TravelInfo,
};
use crate::domain::repositories::TravelRepository;
use crate::error::AppError;

const TRAVEL_COLUMNS: &str = "t.id, t.guest_id, t.transport_mode, t.arrival_date, \
     t.arrival_time, t.arrival_location, t.flight_number, t.needs_transportation, \
     t.flight_status, t.created_at, t.updated_at";

#[derive(FromRow)]
struct TravelRow {
    id: i64,
    guest_id: i64,
    transport_mode: String,
    arrival_date: Option<NaiveDate>,
    arrival_time: Option<NaiveTime>,
    arrival_location: Option<String>,
    flight_number: Option<String>,
    needs_transportation: bool,
    flight_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TravelRow> for TravelInfo {
    type Error = AppError;

    fn try_from(r: TravelRow) -> Result<Self, Self::Error> {
        Ok(TravelInfo {
            id: r.id,
            guest_id: r.guest_id,
            transport_mode: decode_enum::<TransportMode>("transport_mode", &r.transport_mode)?,
            arrival_date: r.arrival_date,
            arrival_time: r.arrival_time,
            arrival_location: r.arrival_location,
            flight_number: r.flight_number,
            needs_transportation: r.needs_transportation,
            flight_status: decode_enum::<FlightStatus>("flight_status", &r.flight_status)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// PostgreSQL repository for guest travel records.
pub struct PgTravelRepository {
    pool: Arc<PgPool>,
}

impl PgTravelRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TravelRepository for PgTravelRepository {
    async fn upsert(&self, info: NewTravelInfo) -> Result<TravelInfo, AppError> {
        let sql = format!(
            r#"
            INSERT INTO travel_info AS t
                (guest_id, transport_mode, arrival_date, arrival_time, arrival_location,
                 flight_number, needs_transportation, flight_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (guest_id) DO UPDATE SET
                transport_mode = EXCLUDED.transport_mode,
                arrival_date = EXCLUDED.arrival_date,
                arrival_time = EXCLUDED.arrival_time,
                arrival_location = EXCLUDED.arrival_location,
                flight_number = EXCLUDED.flight_number,
                needs_transportation = EXCLUDED.needs_transportation,
                flight_status = EXCLUDED.flight_status,
                updated_at = NOW()
            RETURNING {TRAVEL_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, TravelRow>(&sql)
            .bind(info.guest_id)
            .bind(info.transport_mode.as_str())
            .bind(info.arrival_date)
            .bind(info.arrival_time)
            .bind(info.arrival_location)
            .bind(info.flight_number)
            .bind(info.needs_transportation)
            .bind(info.flight_status.as_str())
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_by_guest(&self, guest_id: i64) -> Result<Option<TravelInfo>, AppError> {
        let sql = format!("SELECT {TRAVEL_COLUMNS} FROM travel_info t WHERE t.guest_id = $1");

        let row = sqlx::query_as::<_, TravelRow>(&sql)
            .bind(guest_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<TravelInfo>, AppError> {
        let sql = format!(
            r#"
            SELECT {TRAVEL_COLUMNS}
            FROM travel_info t
            JOIN guests g ON g.id = t.guest_id
            WHERE g.event_id = $1
            ORDER BY t.arrival_date NULLS LAST, t.arrival_time NULLS LAST, t.guest_id
            "#
        );

        let rows = sqlx::query_as::<_, TravelRow>(&sql)
            .bind(event_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn find_flight_arrivals(
        &self,
        event_id: i64,
    ) -> Result<Vec<GuestTravelRecord>, AppError> {
        let sql = format!(
            r#"
            SELECT {TRAVEL_COLUMNS}
            FROM travel_info t
            JOIN guests g ON g.id = t.guest_id
            WHERE g.event_id = $1
              AND t.transport_mode = $2
              AND t.needs_transportation = TRUE
              AND t.flight_status = $3
            ORDER BY t.guest_id
            "#
        );

        let rows = sqlx::query_as::<_, TravelRow>(&sql)
            .bind(event_id)
            .bind(TransportMode::Air.as_str())
            .bind(FlightStatus::Confirmed.as_str())
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter()
            .map(|row| TravelInfo::try_from(row).map(GuestTravelRecord::from))
            .collect()
    }
}
