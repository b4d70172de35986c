//! Transport group entity and its status lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::travel::UnknownVariant;

/// Transport mode recorded on groups produced from flight arrivals.
pub const SHUTTLE_MODE: &str = "shuttle";

/// Lifecycle of a transport group.
///
/// Moves forward only: `draft -> pending -> confirmed`. Variant order is the
/// lifecycle order, so comparisons follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Draft,
    Pending,
    Confirmed,
}

impl GroupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupStatus::Draft => "draft",
            GroupStatus::Pending => "pending",
            GroupStatus::Confirmed => "confirmed",
        }
    }

    /// Returns true if moving from `self` to `next` keeps the lifecycle forward-only.
    ///
    /// Staying in the same state is allowed.
    pub fn can_transition_to(&self, next: GroupStatus) -> bool {
        next >= *self
    }
}

impl FromStr for GroupStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(GroupStatus::Draft),
            "pending" => Ok(GroupStatus::Pending),
            "confirmed" => Ok(GroupStatus::Confirmed),
            _ => Err(UnknownVariant {
                kind: "group status",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle class assigned to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Sedan,
    Suv,
    Bus,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Sedan => "sedan",
            VehicleType::Suv => "suv",
            VehicleType::Bus => "bus",
        }
    }
}

impl FromStr for VehicleType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedan" => Ok(VehicleType::Sedan),
            "suv" => Ok(VehicleType::Suv),
            "bus" => Ok(VehicleType::Bus),
            _ => Err(UnknownVariant {
                kind: "vehicle type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schedulable pickup/dropoff unit with assigned vehicles.
#[derive(Debug, Clone)]
pub struct TransportGroup {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub pickup_location: String,
    pub pickup_date: NaiveDate,
    /// Slot start as `HH:MM`.
    pub pickup_time_slot: String,
    pub dropoff_location: String,
    pub vehicle_type: VehicleType,
    pub vehicle_count: i32,
    pub vehicle_capacity: i32,
    pub status: GroupStatus,
    pub transport_mode: String,
    /// Idempotency key of generated groups; `None` for manually created ones.
    pub generation_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransportGroup {
    /// Total seats across all vehicles.
    pub fn total_seats(&self) -> i32 {
        self.vehicle_count * self.vehicle_capacity
    }
}

/// Input data for inserting or upserting a transport group.
///
/// Groups always start in [`GroupStatus::Draft`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransportGroup {
    pub event_id: i64,
    pub name: String,
    pub pickup_location: String,
    pub pickup_date: NaiveDate,
    pub pickup_time_slot: String,
    pub dropoff_location: String,
    pub vehicle_type: VehicleType,
    pub vehicle_count: i32,
    pub vehicle_capacity: i32,
    pub transport_mode: String,
    pub generation_key: Option<String>,
}

/// Operator edit of a transport group. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TransportGroupPatch {
    pub name: Option<String>,
    pub pickup_location: Option<String>,
    pub pickup_date: Option<NaiveDate>,
    pub pickup_time_slot: Option<String>,
    pub dropoff_location: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub vehicle_count: Option<i32>,
    pub vehicle_capacity: Option<i32>,
    pub status: Option<GroupStatus>,
}
