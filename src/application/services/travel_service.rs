//! Guest travel record service.

use std::sync::Arc;

use serde_json::json;

use super::event_service::event_not_found;
use super::travel_import::parse_travel_csv;
use crate::domain::entities::{Guest, NewTravelInfo, TravelInfo};
use crate::domain::repositories::{EventRepository, GuestRepository, TravelRepository};
use crate::error::AppError;

/// Outcome of one CSV import.
#[derive(Debug)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
    pub errors: Vec<ImportRowError>,
}

/// A row that could not be imported.
#[derive(Debug)]
pub struct ImportRowError {
    pub row: usize,
    pub guest_id: Option<i64>,
    pub error: AppError,
}

/// Service for maintaining guests' arrival details.
///
/// Travel records are keyed by guest; writing one replaces the previous record.
pub struct TravelService<T: TravelRepository, G: GuestRepository, E: EventRepository> {
    travel_repository: Arc<T>,
    guest_repository: Arc<G>,
    event_repository: Arc<E>,
}

impl<T: TravelRepository, G: GuestRepository, E: EventRepository> TravelService<T, G, E> {
    pub fn new(
        travel_repository: Arc<T>,
        guest_repository: Arc<G>,
        event_repository: Arc<E>,
    ) -> Self {
        Self {
            travel_repository,
            guest_repository,
            event_repository,
        }
    }

    /// Creates or replaces a guest's travel record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the guest does not exist.
    pub async fn save_travel(&self, info: NewTravelInfo) -> Result<TravelInfo, AppError> {
        self.find_guest(info.guest_id).await?;
        self.travel_repository.upsert(info).await
    }

    /// Returns a guest's travel record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the guest has no travel record.
    pub async fn get_travel(&self, guest_id: i64) -> Result<TravelInfo, AppError> {
        self.travel_repository
            .find_by_guest(guest_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Travel info not found", json!({ "guest_id": guest_id }))
            })
    }

    /// Lists the travel records of an event's guests.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the event does not exist.
    pub async fn list_travel(&self, event_id: i64) -> Result<Vec<TravelInfo>, AppError> {
        if self.event_repository.find_by_id(event_id).await?.is_none() {
            return Err(event_not_found(event_id));
        }
        self.travel_repository.list_by_event(event_id).await
    }

    /// Imports a travel-agent CSV for an event.
    ///
    /// Each row is validated and written on its own. Rows naming a guest of
    /// another event are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the event does not exist.
    /// Returns [`AppError::Validation`] if the header is missing required columns.
    pub async fn import_csv(&self, event_id: i64, data: &[u8]) -> Result<ImportReport, AppError> {
        if self.event_repository.find_by_id(event_id).await?.is_none() {
            return Err(event_not_found(event_id));
        }

        let rows = parse_travel_csv(data)?;
        let total = rows.len();
        let mut imported = 0;
        let mut errors = Vec::new();

        for parsed in rows {
            let info = match parsed.result {
                Ok(info) => info,
                Err(e) => {
                    errors.push(ImportRowError {
                        row: parsed.row,
                        guest_id: None,
                        error: e.into(),
                    });
                    continue;
                }
            };

            let guest_id = info.guest_id;
            match self.import_row(event_id, info).await {
                Ok(()) => imported += 1,
                Err(error) => errors.push(ImportRowError {
                    row: parsed.row,
                    guest_id: Some(guest_id),
                    error,
                }),
            }
        }

        tracing::info!(
            event_id,
            total,
            imported,
            failed = errors.len(),
            "Travel CSV imported"
        );

        Ok(ImportReport {
            total,
            imported,
            errors,
        })
    }

    async fn import_row(&self, event_id: i64, info: NewTravelInfo) -> Result<(), AppError> {
        let guest = self.find_guest(info.guest_id).await?;
        if guest.event_id != event_id {
            return Err(AppError::bad_request(
                "Guest belongs to another event",
                json!({ "guest_id": guest.id, "event_id": event_id }),
            ));
        }
        self.travel_repository.upsert(info).await?;
        Ok(())
    }

    async fn find_guest(&self, guest_id: i64) -> Result<Guest, AppError> {
        self.guest_repository
            .find_by_id(guest_id)
            .await?
            .ok_or_else(|| AppError::not_found("Guest not found", json!({ "guest_id": guest_id })))
    }
}
