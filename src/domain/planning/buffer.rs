//! Pickup buffer parsing.

use regex::Regex;
use std::sync::LazyLock;

/// Buffer applied when an event has no usable `HH:MM` setting.
pub const DEFAULT_BUFFER_MINUTES: u32 = 30;

static BUFFER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2}):([0-5]\d)\s*$").unwrap());

/// Parses an `HH:MM` buffer into minutes.
///
/// Absent or malformed values fall back to [`DEFAULT_BUFFER_MINUTES`] without
/// an error. `"00:00"` is a valid zero buffer.
///
/// ```
/// use wedding_transport::domain::planning::buffer::parse_buffer_minutes;
///
/// assert_eq!(parse_buffer_minutes(Some("01:15")), 75);
/// assert_eq!(parse_buffer_minutes(Some("1h")), 30);
/// assert_eq!(parse_buffer_minutes(None), 30);
/// ```
pub fn parse_buffer_minutes(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_BUFFER_MINUTES;
    };

    let Some(caps) = BUFFER_PATTERN.captures(raw) else {
        tracing::debug!(value = raw, "Malformed buffer time, using default");
        return DEFAULT_BUFFER_MINUTES;
    };

    let hours: u32 = caps[1].parse().unwrap_or(0);
    let minutes: u32 = caps[2].parse().unwrap_or(0);

    hours * 60 + minutes
}

/// Returns true if `raw` is a well-formed `HH:MM` buffer.
pub fn is_valid_buffer(raw: &str) -> bool {
    BUFFER_PATTERN.is_match(raw)
}
