//! DTOs for guest endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::pagination::PaginationMeta;
use crate::domain::entities::{Guest, NewGuest};

/// Request body for `POST /api/events/{id}/guests`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGuestRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(max = 40))]
    pub phone: Option<String>,

    #[serde(default)]
    pub plus_one_allowed: bool,

    #[serde(default)]
    #[validate(range(min = 0, max = 20))]
    pub children_count: i32,
}

impl CreateGuestRequest {
    pub fn into_new_guest(self, event_id: i64) -> NewGuest {
        NewGuest {
            event_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            plus_one_allowed: self.plus_one_allowed,
            children_count: self.children_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GuestResponse {
    pub id: i64,
    pub event_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plus_one_allowed: bool,
    pub children_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Guest> for GuestResponse {
    fn from(guest: Guest) -> Self {
        let full_name = guest.full_name();
        GuestResponse {
            id: guest.id,
            event_id: guest.event_id,
            first_name: guest.first_name,
            last_name: guest.last_name,
            full_name,
            email: guest.email,
            phone: guest.phone,
            plus_one_allowed: guest.plus_one_allowed,
            children_count: guest.children_count,
            created_at: guest.created_at,
        }
    }
}

/// Paginated list of an event's guests.
#[derive(Debug, Serialize)]
pub struct GuestListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<GuestResponse>,
}
