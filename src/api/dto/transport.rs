//! DTOs for transport group endpoints and generation.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::GenerationReport;
use crate::domain::entities::{
    GroupStatus, TransportAllocation, TransportGroup, TransportGroupPatch, VehicleType,
};

/// Pickup slot label, `HH:MM` on the half hour.
static SLOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):(00|30)$").unwrap());

/// Response of `POST /api/events/{id}/generate-transport-from-flights`.
///
/// Field names are camelCase for the planning front end.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    pub groups_created: usize,
    pub groups_updated: usize,
    pub guests_processed: usize,
    pub guests_grouped: usize,
    pub buffer_minutes: u32,
    pub skipped: Vec<i64>,
}

impl From<GenerationReport> for GenerationResponse {
    fn from(report: GenerationReport) -> Self {
        GenerationResponse {
            success: true,
            groups_created: report.groups_created,
            groups_updated: report.groups_updated,
            guests_processed: report.guests_processed,
            guests_grouped: report.guests_grouped,
            buffer_minutes: report.buffer_minutes,
            skipped: report.skipped,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransportGroupResponse {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub pickup_location: String,
    pub pickup_date: NaiveDate,
    pub pickup_time_slot: String,
    pub dropoff_location: String,
    pub vehicle_type: VehicleType,
    pub vehicle_count: i32,
    pub vehicle_capacity: i32,
    pub total_seats: i32,
    pub status: GroupStatus,
    pub transport_mode: String,
    /// Set on groups produced by flight-driven generation.
    pub generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TransportGroup> for TransportGroupResponse {
    fn from(group: TransportGroup) -> Self {
        let total_seats = group.total_seats();
        TransportGroupResponse {
            id: group.id,
            event_id: group.event_id,
            name: group.name,
            pickup_location: group.pickup_location,
            pickup_date: group.pickup_date,
            pickup_time_slot: group.pickup_time_slot,
            dropoff_location: group.dropoff_location,
            vehicle_type: group.vehicle_type,
            vehicle_count: group.vehicle_count,
            vehicle_capacity: group.vehicle_capacity,
            total_seats,
            status: group.status,
            transport_mode: group.transport_mode,
            generated: group.generation_key.is_some(),
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    pub id: i64,
    pub guest_id: i64,
    pub status: String,
    pub includes_plus_one: bool,
    pub includes_children: bool,
    pub children_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<TransportAllocation> for AllocationResponse {
    fn from(a: TransportAllocation) -> Self {
        AllocationResponse {
            id: a.id,
            guest_id: a.guest_id,
            status: a.status,
            includes_plus_one: a.includes_plus_one,
            includes_children: a.includes_children,
            children_count: a.children_count,
            created_at: a.created_at,
        }
    }
}

/// A group with its allocated guests.
#[derive(Debug, Serialize)]
pub struct TransportGroupDetailResponse {
    #[serde(flatten)]
    pub group: TransportGroupResponse,
    pub allocations: Vec<AllocationResponse>,
}

#[derive(Debug, Serialize)]
pub struct TransportGroupListResponse {
    pub items: Vec<TransportGroupResponse>,
}

#[derive(Debug, Serialize)]
pub struct DeleteDraftsResponse {
    pub deleted: u64,
}

/// Request body for `PATCH /api/transport-groups/{id}`.
///
/// All fields are optional; only provided fields are changed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTransportGroupRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub pickup_location: Option<String>,

    pub pickup_date: Option<NaiveDate>,

    #[validate(regex(path = *SLOT_REGEX, message = "Slot must be HH:00 or HH:30"))]
    pub pickup_time_slot: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub dropoff_location: Option<String>,

    pub vehicle_type: Option<VehicleType>,

    #[validate(range(min = 1, max = 50))]
    pub vehicle_count: Option<i32>,

    #[validate(range(min = 1, max = 100))]
    pub vehicle_capacity: Option<i32>,

    pub status: Option<GroupStatus>,
}

impl From<UpdateTransportGroupRequest> for TransportGroupPatch {
    fn from(req: UpdateTransportGroupRequest) -> Self {
        TransportGroupPatch {
            name: req.name,
            pickup_location: req.pickup_location,
            pickup_date: req.pickup_date,
            pickup_time_slot: req.pickup_time_slot,
            dropoff_location: req.dropoff_location,
            vehicle_type: req.vehicle_type,
            vehicle_count: req.vehicle_count,
            vehicle_capacity: req.vehicle_capacity,
            status: req.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_response_is_camel_case() {
        let report = GenerationReport {
            groups_created: 2,
            groups_updated: 1,
            guests_processed: 9,
            guests_grouped: 8,
            buffer_minutes: 30,
            skipped: vec![17],
            groups_removed: 0,
        };

        let json = serde_json::to_value(GenerationResponse::from(report)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["groupsCreated"], 2);
        assert_eq!(json["groupsUpdated"], 1);
        assert_eq!(json["guestsProcessed"], 9);
        assert_eq!(json["guestsGrouped"], 8);
        assert_eq!(json["bufferMinutes"], 30);
        assert_eq!(json["skipped"][0], 17);
        assert!(json.get("groupsRemoved").is_none());
    }

    #[test]
    fn test_update_request_validation() {
        let ok: UpdateTransportGroupRequest =
            serde_json::from_str(r#"{"pickup_time_slot": "13:30", "status": "pending"}"#).unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.status, Some(GroupStatus::Pending));

        let bad_slot: UpdateTransportGroupRequest =
            serde_json::from_str(r#"{"pickup_time_slot": "13:15"}"#).unwrap();
        assert!(bad_slot.validate().is_err());

        let bad_count: UpdateTransportGroupRequest =
            serde_json::from_str(r#"{"vehicle_count": 0}"#).unwrap();
        assert!(bad_count.validate().is_err());
    }
}
