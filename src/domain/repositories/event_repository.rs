//! Repository trait for wedding events.

use crate::domain::entities::{EventPatch, NewEvent, WeddingEvent};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for wedding events.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEventRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_event.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts a new event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_event: NewEvent) -> Result<WeddingEvent, AppError>;

    /// Finds an event by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<WeddingEvent>, AppError>;

    /// Lists all events, most recent start date first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<WeddingEvent>, AppError>;

    /// Applies a partial update.
    ///
    /// Returns `Ok(None)` if the event does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: EventPatch) -> Result<Option<WeddingEvent>, AppError>;
}
