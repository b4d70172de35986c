//! Repository trait for guests.

use crate::domain::entities::{Guest, NewGuest};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for event guests.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgGuestRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Inserts a guest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the event does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_guest: NewGuest) -> Result<Guest, AppError>;

    /// Finds a guest by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Guest>, AppError>;

    /// Lists an event's guests ordered by last then first name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_event(
        &self,
        event_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Guest>, AppError>;

    /// Counts an event's guests.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_event(&self, event_id: i64) -> Result<i64, AppError>;
}
