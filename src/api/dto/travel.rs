//! DTOs for travel record endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::domain::entities::{
    FLIGHT_NUMBER_REGEX, FlightStatus, NewTravelInfo, TransportMode, TravelInfo,
    parse_arrival_time,
};
use crate::error::{AppError, ErrorInfo};

/// Request body for `PUT /api/guests/{id}/travel`.
#[derive(Debug, Deserialize, Validate)]
pub struct TravelRequest {
    #[serde(default = "default_transport_mode")]
    pub transport_mode: TransportMode,

    pub arrival_date: Option<NaiveDate>,

    /// Local arrival time as `HH:MM` or `HH:MM:SS`.
    pub arrival_time: Option<String>,

    /// Airport or station code, e.g. `LIS`.
    #[validate(length(min = 1, max = 100))]
    pub arrival_location: Option<String>,

    #[validate(regex(path = *FLIGHT_NUMBER_REGEX, message = "Invalid flight number"))]
    pub flight_number: Option<String>,

    #[serde(default)]
    pub needs_transportation: bool,

    #[serde(default = "default_flight_status")]
    pub flight_status: FlightStatus,
}

fn default_transport_mode() -> TransportMode {
    TransportMode::Air
}

fn default_flight_status() -> FlightStatus {
    FlightStatus::Scheduled
}

impl TravelRequest {
    /// Converts the request into a record for `guest_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `arrival_time` is not a clock time.
    pub fn into_new_travel(self, guest_id: i64) -> Result<NewTravelInfo, AppError> {
        let arrival_time = self
            .arrival_time
            .as_deref()
            .map(|raw| {
                parse_arrival_time(raw).ok_or_else(|| {
                    AppError::bad_request(
                        "Invalid arrival time",
                        json!({ "arrival_time": raw, "expected": "HH:MM" }),
                    )
                })
            })
            .transpose()?;

        Ok(NewTravelInfo {
            guest_id,
            transport_mode: self.transport_mode,
            arrival_date: self.arrival_date,
            arrival_time,
            arrival_location: self.arrival_location,
            flight_number: self.flight_number.map(|f| f.to_ascii_uppercase()),
            needs_transportation: self.needs_transportation,
            flight_status: self.flight_status,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TravelResponse {
    pub id: i64,
    pub guest_id: i64,
    pub transport_mode: TransportMode,
    pub arrival_date: Option<NaiveDate>,
    /// Formatted as `HH:MM`.
    pub arrival_time: Option<String>,
    pub arrival_location: Option<String>,
    pub flight_number: Option<String>,
    pub needs_transportation: bool,
    pub flight_status: FlightStatus,
    pub updated_at: DateTime<Utc>,
}

impl From<TravelInfo> for TravelResponse {
    fn from(info: TravelInfo) -> Self {
        TravelResponse {
            id: info.id,
            guest_id: info.guest_id,
            transport_mode: info.transport_mode,
            arrival_date: info.arrival_date,
            arrival_time: info.arrival_time.map(|t| t.format("%H:%M").to_string()),
            arrival_location: info.arrival_location,
            flight_number: info.flight_number,
            needs_transportation: info.needs_transportation,
            flight_status: info.flight_status,
            updated_at: info.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TravelListResponse {
    pub items: Vec<TravelResponse>,
}

/// Response of `POST /api/events/{id}/travel/import`.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub total: usize,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<ImportErrorItem>,
}

/// A CSV row that was not imported. `row` counts data rows from 1.
#[derive(Debug, Serialize)]
pub struct ImportErrorItem {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<i64>,
    pub error: ErrorInfo,
}
