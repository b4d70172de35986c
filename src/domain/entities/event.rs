//! Wedding event entity.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::planning::buffer::parse_buffer_minutes;

/// Dropoff used when an event has neither a hotel nor a location configured.
pub const DEFAULT_DROPOFF: &str = "Hotel";

/// A wedding event that guests travel to.
///
/// Carries the transport settings consumed by flight-driven group generation:
/// the hotel guests are driven to and the pickup buffer after landing.
#[derive(Debug, Clone)]
pub struct WeddingEvent {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub hotel_name: Option<String>,
    /// Pickup buffer after arrival as `HH:MM`.
    pub transport_buffer_time: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeddingEvent {
    /// Where generated shuttles drop guests off.
    ///
    /// Hotel name first, then the event location, then [`DEFAULT_DROPOFF`].
    /// Blank strings count as unset.
    pub fn dropoff_location(&self) -> String {
        [self.hotel_name.as_deref(), self.location.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DROPOFF)
            .to_string()
    }

    /// Pickup buffer in minutes, falling back to the default on bad input.
    pub fn buffer_minutes(&self) -> u32 {
        parse_buffer_minutes(self.transport_buffer_time.as_deref())
    }
}

/// Input data for creating an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub location: Option<String>,
    pub hotel_name: Option<String>,
    pub transport_buffer_time: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Partial update for an event.
///
/// `None` leaves a field unchanged; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub location: Option<Option<String>>,
    pub hotel_name: Option<Option<String>>,
    pub transport_buffer_time: Option<Option<String>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl EventPatch {
    /// Returns true when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.hotel_name.is_none()
            && self.transport_buffer_time.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(location: Option<&str>, hotel: Option<&str>, buffer: Option<&str>) -> WeddingEvent {
        WeddingEvent {
            id: 1,
            name: "Ana & Luis".to_string(),
            location: location.map(str::to_string),
            hotel_name: hotel.map(str::to_string),
            transport_buffer_time: buffer.map(str::to_string),
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_dropoff_prefers_hotel() {
        let e = event(Some("Lisbon"), Some("Pestana Palace"), None);
        assert_eq!(e.dropoff_location(), "Pestana Palace");
    }

    #[test]
    fn test_dropoff_falls_back_to_location() {
        let e = event(Some("Lisbon"), None, None);
        assert_eq!(e.dropoff_location(), "Lisbon");

        let blank_hotel = event(Some("Lisbon"), Some("  "), None);
        assert_eq!(blank_hotel.dropoff_location(), "Lisbon");
    }

    #[test]
    fn test_dropoff_default() {
        let e = event(None, None, None);
        assert_eq!(e.dropoff_location(), DEFAULT_DROPOFF);
    }

    #[test]
    fn test_buffer_minutes() {
        assert_eq!(event(None, None, Some("01:15")).buffer_minutes(), 75);
        assert_eq!(event(None, None, None).buffer_minutes(), 30);
        assert_eq!(event(None, None, Some("soon")).buffer_minutes(), 30);
    }

    #[test]
    fn test_empty_patch() {
        assert!(EventPatch::default().is_empty());

        let patch = EventPatch {
            hotel_name: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
