//! Wedding event management service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::entities::{EventPatch, NewEvent, WeddingEvent};
use crate::domain::planning::buffer::is_valid_buffer;
use crate::domain::repositories::EventRepository;
use crate::error::AppError;

/// Service for creating, reading and editing events.
///
/// Rejects buffer times that are not `HH:MM` at write time. Values already
/// stored are still read leniently by generation.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the buffer time is malformed or the
    /// end date precedes the start date.
    pub async fn create_event(&self, new_event: NewEvent) -> Result<WeddingEvent, AppError> {
        if let Some(buffer) = new_event.transport_buffer_time.as_deref() {
            check_buffer(buffer)?;
        }
        check_dates(new_event.start_date, new_event.end_date)?;

        let event = self.repository.create(new_event).await?;
        tracing::info!(event_id = event.id, name = %event.name, "Event created");

        Ok(event)
    }

    /// Returns the event or [`AppError::NotFound`].
    pub async fn get_event(&self, id: i64) -> Result<WeddingEvent, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| event_not_found(id))
    }

    pub async fn list_events(&self) -> Result<Vec<WeddingEvent>, AppError> {
        self.repository.list().await
    }

    /// Applies a partial update.
    ///
    /// An empty patch returns the event unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the event does not exist.
    /// Returns [`AppError::Validation`] for a malformed buffer time or inverted dates.
    pub async fn update_event(&self, id: i64, patch: EventPatch) -> Result<WeddingEvent, AppError> {
        if patch.is_empty() {
            return self.get_event(id).await;
        }

        if let Some(Some(buffer)) = patch.transport_buffer_time.as_ref() {
            check_buffer(buffer)?;
        }

        if patch.start_date.is_some() || patch.end_date.is_some() {
            let current = self.get_event(id).await?;
            let start = patch.start_date.unwrap_or(current.start_date);
            let end = patch.end_date.unwrap_or(current.end_date);
            check_dates(start, end)?;
        }

        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| event_not_found(id))
    }
}

pub(crate) fn event_not_found(id: i64) -> AppError {
    AppError::not_found("Event not found", json!({ "event_id": id }))
}

fn check_buffer(buffer: &str) -> Result<(), AppError> {
    if is_valid_buffer(buffer) {
        return Ok(());
    }
    Err(AppError::bad_request(
        "Invalid transport buffer time",
        json!({ "transport_buffer_time": buffer, "expected": "HH:MM" }),
    ))
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), AppError> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(AppError::bad_request(
            "End date precedes start date",
            json!({ "start_date": s, "end_date": e }),
        )),
        _ => Ok(()),
    }
}
