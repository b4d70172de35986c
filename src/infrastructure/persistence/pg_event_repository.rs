//! PostgreSQL implementation of event repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{EventPatch, NewEvent, WeddingEvent};
use crate::domain::repositories::EventRepository;
use crate::error::AppError;

const EVENT_COLUMNS: &str = "id, name, location, hotel_name, transport_buffer_time, \
     start_date, end_date, created_at, updated_at";

#[derive(FromRow)]
struct EventRow {
    id: i64,
    name: String,
    location: Option<String>,
    hotel_name: Option<String>,
    transport_buffer_time: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EventRow> for WeddingEvent {
    fn from(r: EventRow) -> Self {
        WeddingEvent {
            id: r.id,
            name: r.name,
            location: r.location,
            hotel_name: r.hotel_name,
            transport_buffer_time: r.transport_buffer_time,
            start_date: r.start_date,
            end_date: r.end_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for wedding events.
pub struct PgEventRepository {
    pool: Arc<PgPool>,
}

impl PgEventRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, new_event: NewEvent) -> Result<WeddingEvent, AppError> {
        let sql = format!(
            r#"
            INSERT INTO wedding_events
                (name, location, hotel_name, transport_buffer_time, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EVENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(new_event.name)
            .bind(new_event.location)
            .bind(new_event.hotel_name)
            .bind(new_event.transport_buffer_time)
            .bind(new_event.start_date)
            .bind(new_event.end_date)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<WeddingEvent>, AppError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM wedding_events WHERE id = $1");

        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<WeddingEvent>, AppError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM wedding_events \
             ORDER BY start_date DESC NULLS LAST, id DESC"
        );

        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, patch: EventPatch) -> Result<Option<WeddingEvent>, AppError> {
        let sql = format!(
            r#"
            UPDATE wedding_events SET
                name = COALESCE($2, name),
                location = CASE WHEN $3 THEN $4 ELSE location END,
                hotel_name = CASE WHEN $5 THEN $6 ELSE hotel_name END,
                transport_buffer_time = CASE WHEN $7 THEN $8 ELSE transport_buffer_time END,
                start_date = CASE WHEN $9 THEN $10 ELSE start_date END,
                end_date = CASE WHEN $11 THEN $12 ELSE end_date END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.location.is_some())
            .bind(patch.location.flatten())
            .bind(patch.hotel_name.is_some())
            .bind(patch.hotel_name.flatten())
            .bind(patch.transport_buffer_time.is_some())
            .bind(patch.transport_buffer_time.flatten())
            .bind(patch.start_date.is_some())
            .bind(patch.start_date.flatten())
            .bind(patch.end_date.is_some())
            .bind(patch.end_date.flatten())
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }
}
