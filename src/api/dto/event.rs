//! DTOs for event endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use validator::Validate;

use crate::domain::entities::{EventPatch, NewEvent, WeddingEvent};

/// Request body for `POST /api/events`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    /// Where generated shuttles drop guests off.
    #[validate(length(max = 200))]
    pub hotel_name: Option<String>,

    /// Pickup buffer after landing as `HH:MM` (default 30 minutes).
    pub transport_buffer_time: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        NewEvent {
            name: req.name,
            location: req.location,
            hotel_name: req.hotel_name,
            transport_buffer_time: req.transport_buffer_time,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// Request body for `PATCH /api/events/{id}`.
///
/// Nullable fields: absent = no change, `null` = clear, value = set.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub location: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub hotel_name: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub transport_buffer_time: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub start_date: Option<Option<NaiveDate>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub end_date: Option<Option<NaiveDate>>,
}

impl From<UpdateEventRequest> for EventPatch {
    fn from(req: UpdateEventRequest) -> Self {
        EventPatch {
            name: req.name,
            location: req.location,
            hotel_name: req.hotel_name,
            transport_buffer_time: req.transport_buffer_time,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub hotel_name: Option<String>,
    pub transport_buffer_time: Option<String>,
    /// Buffer actually applied by generation.
    pub buffer_minutes: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WeddingEvent> for EventResponse {
    fn from(event: WeddingEvent) -> Self {
        let buffer_minutes = event.buffer_minutes();
        EventResponse {
            id: event.id,
            name: event.name,
            location: event.location,
            hotel_name: event.hotel_name,
            transport_buffer_time: event.transport_buffer_time,
            buffer_minutes,
            start_date: event.start_date,
            end_date: event.end_date,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub items: Vec<EventResponse>,
}
