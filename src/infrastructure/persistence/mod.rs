//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! Queries are checked at runtime and decoded into private `FromRow` row types
//! that are then mapped onto domain entities.
//!
//! # Repositories
//!
//! - [`PgEventRepository`] - Wedding events
//! - [`PgGuestRepository`] - Guests
//! - [`PgTravelRepository`] - Travel records and flight arrivals
//! - [`PgTransportRepository`] - Transport groups, allocations and generated writes
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_event_repository;
pub mod pg_guest_repository;
pub mod pg_token_repository;
pub mod pg_transport_repository;
pub mod pg_travel_repository;

pub use pg_event_repository::PgEventRepository;
pub use pg_guest_repository::PgGuestRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_transport_repository::PgTransportRepository;
pub use pg_travel_repository::PgTravelRepository;

use crate::domain::entities::UnknownVariant;
use crate::error::AppError;
use serde_json::json;
use std::str::FromStr;

/// Decodes a TEXT column into one of the domain enums.
pub(crate) fn decode_enum<T>(column: &'static str, value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = UnknownVariant>,
{
    value.parse().map_err(|e: UnknownVariant| {
        tracing::error!(column, value, "Unexpected value in database");
        AppError::internal(
            "Corrupt row in database",
            json!({ "column": column, "reason": e.to_string() }),
        )
    })
}
