//! Transport allocation entity.

use chrono::{DateTime, Utc};

/// Status given to allocations created by the generator.
pub const PENDING_ALLOCATION: &str = "pending";

/// Association of one guest to one transport group.
#[derive(Debug, Clone)]
pub struct TransportAllocation {
    pub id: i64,
    pub transport_group_id: i64,
    pub guest_id: i64,
    pub status: String,
    pub includes_plus_one: bool,
    pub includes_children: bool,
    pub children_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating an allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAllocation {
    pub guest_id: i64,
    pub status: String,
    pub includes_plus_one: bool,
    pub includes_children: bool,
    pub children_count: i32,
}

impl NewAllocation {
    /// Allocation as written by flight-driven generation.
    ///
    /// Companion flags are not derived from the guest's entitlements.
    pub fn pending(guest_id: i64) -> Self {
        Self {
            guest_id,
            status: PENDING_ALLOCATION.to_string(),
            includes_plus_one: false,
            includes_children: false,
            children_count: 0,
        }
    }
}
