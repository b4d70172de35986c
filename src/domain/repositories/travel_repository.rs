//! Repository trait for guest travel information.

use crate::domain::entities::{GuestTravelRecord, NewTravelInfo, TravelInfo};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for guest travel records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTravelRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_travel.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelRepository: Send + Sync {
    /// Creates or replaces the travel record of `info.guest_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the guest does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, info: NewTravelInfo) -> Result<TravelInfo, AppError>;

    /// Finds the travel record of a guest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_guest(&self, guest_id: i64) -> Result<Option<TravelInfo>, AppError>;

    /// Lists all travel records of an event's guests.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_event(&self, event_id: i64) -> Result<Vec<TravelInfo>, AppError>;

    /// Reads the arrivals eligible for shuttle generation.
    ///
    /// Only rows with `transport_mode = 'air'`, `needs_transportation = true`
    /// and `flight_status = 'confirmed'` are returned, ordered by guest ID.
    /// Arrival date and time may still be missing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_flight_arrivals(&self, event_id: i64)
    -> Result<Vec<GuestTravelRecord>, AppError>;
}
