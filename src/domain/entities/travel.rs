//! Guest travel records and their enumerations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// IATA-style flight number: airline designator, optional space, 1-4 digits
/// and an optional suffix letter (`TP1351`, `U2 7634`, `BA432A`).
pub static FLIGHT_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{2}[A-Za-z]?\s?\d{1,4}[A-Za-z]?$").unwrap());

/// Raised when a stored or submitted enum string has no matching variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// How a guest reaches the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Air,
    Rail,
    Road,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Air => "air",
            TransportMode::Rail => "rail",
            TransportMode::Road => "road",
        }
    }
}

impl FromStr for TransportMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "air" => Ok(TransportMode::Air),
            "rail" => Ok(TransportMode::Rail),
            "road" => Ok(TransportMode::Road),
            _ => Err(UnknownVariant {
                kind: "transport mode",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Airline status of a guest's inbound flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Scheduled,
    Confirmed,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "scheduled",
            FlightStatus::Confirmed => "confirmed",
            FlightStatus::Delayed => "delayed",
            FlightStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for FlightStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(FlightStatus::Scheduled),
            "confirmed" => Ok(FlightStatus::Confirmed),
            "delayed" => Ok(FlightStatus::Delayed),
            "cancelled" => Ok(FlightStatus::Cancelled),
            _ => Err(UnknownVariant {
                kind: "flight status",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored travel information for one guest.
#[derive(Debug, Clone)]
pub struct TravelInfo {
    pub id: i64,
    pub guest_id: i64,
    pub transport_mode: TransportMode,
    pub arrival_date: Option<NaiveDate>,
    pub arrival_time: Option<NaiveTime>,
    pub arrival_location: Option<String>,
    pub flight_number: Option<String>,
    pub needs_transportation: bool,
    pub flight_status: FlightStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating or replacing a guest's travel information.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTravelInfo {
    pub guest_id: i64,
    pub transport_mode: TransportMode,
    pub arrival_date: Option<NaiveDate>,
    pub arrival_time: Option<NaiveTime>,
    pub arrival_location: Option<String>,
    pub flight_number: Option<String>,
    pub needs_transportation: bool,
    pub flight_status: FlightStatus,
}

/// Read-only projection consumed by transport generation.
///
/// Produced by [`crate::domain::repositories::TravelRepository::find_flight_arrivals`],
/// which already restricts rows to confirmed air arrivals needing transport.
/// Date and time stay optional here; the bucketer decides what to skip.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestTravelRecord {
    pub guest_id: i64,
    pub arrival_date: Option<NaiveDate>,
    pub arrival_time: Option<NaiveTime>,
    pub arrival_location: Option<String>,
    pub flight_number: Option<String>,
    pub needs_transportation: bool,
    pub flight_status: FlightStatus,
}

impl From<TravelInfo> for GuestTravelRecord {
    fn from(info: TravelInfo) -> Self {
        Self {
            guest_id: info.guest_id,
            arrival_date: info.arrival_date,
            arrival_time: info.arrival_time,
            arrival_location: info.arrival_location,
            flight_number: info.flight_number,
            needs_transportation: info.needs_transportation,
            flight_status: info.flight_status,
        }
    }
}

/// Parses a local clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_arrival_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}
