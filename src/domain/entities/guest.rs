//! Guest entity.

use chrono::{DateTime, Utc};

/// A person invited to an event.
#[derive(Debug, Clone)]
pub struct Guest {
    pub id: i64,
    pub event_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plus_one_allowed: bool,
    pub children_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input data for creating a guest.
#[derive(Debug, Clone)]
pub struct NewGuest {
    pub event_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plus_one_allowed: bool,
    pub children_count: i32,
}
