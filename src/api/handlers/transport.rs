//! Handlers for transport generation and transport group endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::transport::{
    AllocationResponse, DeleteDraftsResponse, GenerationResponse, TransportGroupDetailResponse,
    TransportGroupListResponse, TransportGroupResponse, UpdateTransportGroupRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Builds shuttle groups from guests' flight arrivals.
///
/// # Endpoint
///
/// `POST /api/events/{id}/generate-transport-from-flights`
///
/// Running it again for unchanged data updates the same groups instead of
/// creating duplicates.
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "groupsCreated": 2,
///   "groupsUpdated": 0,
///   "guestsProcessed": 7,
///   "guestsGrouped": 6,
///   "bufferMinutes": 30,
///   "skipped": [12]
/// }
/// ```
///
/// # Errors
///
/// Failures use the shared error envelope, e.g. for an unknown event:
///
/// ```json
/// { "error": { "code": "not_found", "message": "Event not found", "details": { "event_id": 99 } } }
/// ```
///
/// Returns 404 Not Found with `"Event not found"` for an unknown event.
/// Returns 409 Conflict if a generation for the same event is already running.
pub async fn generate_transport_handler(
    Path(event_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<GenerationResponse>, AppError> {
    let report = state
        .transport_service
        .generate_from_flights(event_id)
        .await?;

    Ok(Json(report.into()))
}

pub async fn list_groups_handler(
    Path(event_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<TransportGroupListResponse>, AppError> {
    let groups = state.transport_service.list_groups(event_id).await?;

    Ok(Json(TransportGroupListResponse {
        items: groups.into_iter().map(TransportGroupResponse::from).collect(),
    }))
}

/// Deletes all draft groups of an event.
///
/// `DELETE /api/events/{id}/transport-groups`
pub async fn delete_draft_groups_handler(
    Path(event_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeleteDraftsResponse>, AppError> {
    let deleted = state
        .transport_service
        .delete_draft_groups(event_id)
        .await?;

    Ok(Json(DeleteDraftsResponse { deleted }))
}

pub async fn get_group_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<TransportGroupDetailResponse>, AppError> {
    let (group, allocations) = state.transport_service.get_group(id).await?;

    Ok(Json(TransportGroupDetailResponse {
        group: group.into(),
        allocations: allocations
            .into_iter()
            .map(AllocationResponse::from)
            .collect(),
    }))
}

/// Edits a transport group.
///
/// # Endpoint
///
/// `PATCH /api/transport-groups/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request for invalid fields or a backward status change.
/// Returns 404 Not Found if the group does not exist.
pub async fn update_group_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateTransportGroupRequest>,
) -> Result<Json<TransportGroupResponse>, AppError> {
    payload.validate()?;

    let group = state
        .transport_service
        .update_group(id, payload.into())
        .await?;

    Ok(Json(group.into()))
}

pub async fn delete_group_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.transport_service.delete_group(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
