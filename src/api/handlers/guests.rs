//! Handlers for guest endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::guest::{CreateGuestRequest, GuestListResponse, GuestResponse};
use crate::api::dto::pagination::{Page, PaginationParams};
use crate::error::AppError;
use crate::state::AppState;

/// Adds a guest to an event.
///
/// # Endpoint
///
/// `POST /api/events/{id}/guests`
///
/// # Errors
///
/// Returns 404 Not Found if the event does not exist.
pub async fn create_guest_handler(
    Path(event_id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CreateGuestRequest>,
) -> Result<(StatusCode, Json<GuestResponse>), AppError> {
    payload.validate()?;

    let guest = state
        .guest_service
        .create_guest(payload.into_new_guest(event_id))
        .await?;

    Ok((StatusCode::CREATED, Json(guest.into())))
}

/// Lists an event's guests.
///
/// # Endpoint
///
/// `GET /api/events/{id}/guests?page=1&page_size=25`
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
/// Returns 404 Not Found if the event does not exist.
pub async fn list_guests_handler(
    Path(event_id): Path<i64>,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<GuestListResponse>, AppError> {
    let page = Page::try_from(params)?;

    let (guests, total_items) = state
        .guest_service
        .list_guests(event_id, page.offset(), page.limit())
        .await?;

    Ok(Json(GuestListResponse {
        pagination: page.meta(total_items),
        items: guests.into_iter().map(GuestResponse::from).collect(),
    }))
}
