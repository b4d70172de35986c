//! Guest management service.

use std::sync::Arc;

use serde_json::json;

use super::event_service::event_not_found;
use crate::domain::entities::{Guest, NewGuest};
use crate::domain::repositories::{EventRepository, GuestRepository};
use crate::error::AppError;

/// Service for registering and listing an event's guests.
pub struct GuestService<G: GuestRepository, E: EventRepository> {
    guest_repository: Arc<G>,
    event_repository: Arc<E>,
}

impl<G: GuestRepository, E: EventRepository> GuestService<G, E> {
    pub fn new(guest_repository: Arc<G>, event_repository: Arc<E>) -> Self {
        Self {
            guest_repository,
            event_repository,
        }
    }

    /// Adds a guest to an existing event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the event does not exist.
    pub async fn create_guest(&self, new_guest: NewGuest) -> Result<Guest, AppError> {
        self.ensure_event(new_guest.event_id).await?;

        let guest = self.guest_repository.create(new_guest).await?;
        tracing::debug!(guest_id = guest.id, event_id = guest.event_id, "Guest created");

        Ok(guest)
    }

    /// Returns the guest or [`AppError::NotFound`].
    pub async fn get_guest(&self, id: i64) -> Result<Guest, AppError> {
        self.guest_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Guest not found", json!({ "guest_id": id })))
    }

    /// Returns one page of guests and the event's total guest count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the event does not exist.
    pub async fn list_guests(
        &self,
        event_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Guest>, i64), AppError> {
        self.ensure_event(event_id).await?;

        tokio::try_join!(
            self.guest_repository.list_by_event(event_id, offset, limit),
            self.guest_repository.count_by_event(event_id)
        )
    }

    async fn ensure_event(&self, event_id: i64) -> Result<(), AppError> {
        match self.event_repository.find_by_id(event_id).await? {
            Some(_) => Ok(()),
            None => Err(event_not_found(event_id)),
        }
    }
}
