//! Handlers for travel record endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::travel::{
    ImportErrorItem, ImportResponse, TravelListResponse, TravelRequest, TravelResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Creates or replaces a guest's travel record.
///
/// # Endpoint
///
/// `PUT /api/guests/{id}/travel`
///
/// # Request Body
///
/// ```json
/// {
///   "transport_mode": "air",
///   "arrival_date": "2026-06-12",
///   "arrival_time": "13:10",
///   "arrival_location": "LIS",
///   "flight_number": "TP1351",
///   "needs_transportation": true,
///   "flight_status": "confirmed"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for invalid fields and 404 Not Found for an unknown guest.
pub async fn put_travel_handler(
    Path(guest_id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<TravelRequest>,
) -> Result<Json<TravelResponse>, AppError> {
    payload.validate()?;

    let info = state
        .travel_service
        .save_travel(payload.into_new_travel(guest_id)?)
        .await?;

    Ok(Json(info.into()))
}

pub async fn get_travel_handler(
    Path(guest_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<TravelResponse>, AppError> {
    let info = state.travel_service.get_travel(guest_id).await?;
    Ok(Json(info.into()))
}

/// Lists travel records of an event's guests.
///
/// `GET /api/events/{id}/travel`
pub async fn list_event_travel_handler(
    Path(event_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<TravelListResponse>, AppError> {
    let records = state.travel_service.list_travel(event_id).await?;

    Ok(Json(TravelListResponse {
        items: records.into_iter().map(TravelResponse::from).collect(),
    }))
}

/// Imports a travel-agent CSV export for an event.
///
/// # Endpoint
///
/// `POST /api/events/{id}/travel/import` with a `text/csv` body.
///
/// # Batch Processing
///
/// Rows are processed independently. If one fails, others continue processing;
/// failures are listed with their data row number.
///
/// # Response
///
/// ```json
/// {
///   "total": 3,
///   "imported": 2,
///   "failed": 1,
///   "errors": [
///     {
///       "row": 2,
///       "guest_id": 41,
///       "error": { "code": "not_found", "message": "Guest not found", "details": { "guest_id": 41 } }
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the header row lacks a required column.
/// Returns 404 Not Found if the event does not exist.
pub async fn import_travel_handler(
    Path(event_id): Path<i64>,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportResponse>, AppError> {
    let report = state.travel_service.import_csv(event_id, &body).await?;

    let errors: Vec<ImportErrorItem> = report
        .errors
        .into_iter()
        .map(|e| ImportErrorItem {
            row: e.row,
            guest_id: e.guest_id,
            error: e.error.to_error_info(),
        })
        .collect();

    Ok(Json(ImportResponse {
        total: report.total,
        imported: report.imported,
        failed: errors.len(),
        errors,
    }))
}
