//! PostgreSQL implementation of guest repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Guest, NewGuest};
use crate::domain::repositories::GuestRepository;
use crate::error::AppError;

const GUEST_COLUMNS: &str = "id, event_id, first_name, last_name, email, phone, \
     plus_one_allowed, children_count, created_at";

#[derive(FromRow)]
struct GuestRow {
    id: i64,
    event_id: i64,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    plus_one_allowed: bool,
    children_count: i32,
    created_at: DateTime<Utc>,
}

impl From<GuestRow> for Guest {
    fn from(r: GuestRow) -> Self {
        Guest {
            id: r.id,
            event_id: r.event_id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            plus_one_allowed: r.plus_one_allowed,
            children_count: r.children_count,
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL repository for guests.
pub struct PgGuestRepository {
    pool: Arc<PgPool>,
}

impl PgGuestRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for PgGuestRepository {
    async fn create(&self, new_guest: NewGuest) -> Result<Guest, AppError> {
        let sql = format!(
            r#"
            INSERT INTO guests
                (event_id, first_name, last_name, email, phone, plus_one_allowed, children_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {GUEST_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, GuestRow>(&sql)
            .bind(new_guest.event_id)
            .bind(new_guest.first_name)
            .bind(new_guest.last_name)
            .bind(new_guest.email)
            .bind(new_guest.phone)
            .bind(new_guest.plus_one_allowed)
            .bind(new_guest.children_count)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Guest>, AppError> {
        let sql = format!("SELECT {GUEST_COLUMNS} FROM guests WHERE id = $1");

        let row = sqlx::query_as::<_, GuestRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_event(
        &self,
        event_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Guest>, AppError> {
        let sql = format!(
            r#"
            SELECT {GUEST_COLUMNS}
            FROM guests
            WHERE event_id = $1
            ORDER BY last_name, first_name, id
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, GuestRow>(&sql)
            .bind(event_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_event(&self, event_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
