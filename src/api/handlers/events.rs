//! Handlers for event endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::event::{
    CreateEventRequest, EventListResponse, EventResponse, UpdateEventRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Creates an event.
///
/// # Endpoint
///
/// `POST /api/events`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ana & Luis",
///   "location": "Sintra",
///   "hotel_name": "Tivoli Sintra",
///   "transport_buffer_time": "00:45",
///   "start_date": "2026-06-12",
///   "end_date": "2026-06-14"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails or the buffer is not `HH:MM`.
pub async fn create_event_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    payload.validate()?;

    let event = state.event_service.create_event(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(event.into())))
}

pub async fn list_events_handler(
    State(state): State<AppState>,
) -> Result<Json<EventListResponse>, AppError> {
    let events = state.event_service.list_events().await?;

    Ok(Json(EventListResponse {
        items: events.into_iter().map(EventResponse::from).collect(),
    }))
}

/// Returns one event.
///
/// # Errors
///
/// Returns 404 Not Found with `"Event not found"` for an unknown ID.
pub async fn get_event_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<EventResponse>, AppError> {
    let event = state.event_service.get_event(id).await?;
    Ok(Json(event.into()))
}

/// Partially updates an event.
///
/// # Endpoint
///
/// `PATCH /api/events/{id}`
///
/// Nullable fields follow absent = keep, `null` = clear, value = set.
/// Clearing `transport_buffer_time` restores the 30-minute default.
pub async fn update_event_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    payload.validate()?;

    let event = state.event_service.update_event(id, payload.into()).await?;

    Ok(Json(event.into()))
}
