//! Parsing of travel-agent CSV exports.
//!
//! Expected header (order free, extra columns ignored):
//!
//! ```text
//! guest_id,transport_mode,arrival_date,arrival_time,arrival_location,flight_number,needs_transportation,flight_status
//! ```
//!
//! Rows are parsed independently so one bad row does not reject the file.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::{
    FLIGHT_NUMBER_REGEX, FlightStatus, NewTravelInfo, TransportMode, parse_arrival_time,
};
use crate::error::AppError;

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "guest_id",
    "transport_mode",
    "arrival_date",
    "arrival_time",
    "arrival_location",
    "flight_number",
    "needs_transportation",
    "flight_status",
];

/// Errors raised while reading a travel CSV.
#[derive(Debug, thiserror::Error)]
pub enum CsvImportError {
    #[error("CSV header is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Malformed CSV: {0}")]
    Malformed(String),
    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl From<CsvImportError> for AppError {
    fn from(e: CsvImportError) -> Self {
        let details = match &e {
            CsvImportError::MissingColumns(columns) => json!({ "missing": columns }),
            CsvImportError::Malformed(_) => json!({}),
            CsvImportError::InvalidField { field, value, .. } => {
                json!({ "field": field, "value": value })
            }
        };
        AppError::bad_request(e.to_string(), details)
    }
}

/// One data row of the file, numbered from 1 after the header.
#[derive(Debug)]
pub struct ParsedRow {
    pub row: usize,
    pub result: Result<NewTravelInfo, CsvImportError>,
}

#[derive(Debug, Deserialize)]
struct TravelCsvRecord {
    guest_id: Option<String>,
    transport_mode: Option<String>,
    arrival_date: Option<String>,
    arrival_time: Option<String>,
    arrival_location: Option<String>,
    flight_number: Option<String>,
    needs_transportation: Option<String>,
    flight_status: Option<String>,
}

/// Reads a CSV document into per-row travel records.
///
/// # Errors
///
/// Returns [`CsvImportError::MissingColumns`] if the header lacks a required
/// column and [`CsvImportError::Malformed`] if the header cannot be read.
/// Problems in data rows are reported inside each [`ParsedRow`].
pub fn parse_travel_csv(data: &[u8]) -> Result<Vec<ParsedRow>, CsvImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| CsvImportError::Malformed(e.to_string()))?
        .clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CsvImportError::MissingColumns(missing));
    }

    let rows = reader
        .deserialize::<TravelCsvRecord>()
        .enumerate()
        .map(|(index, record)| ParsedRow {
            row: index + 1,
            result: record
                .map_err(|e| CsvImportError::Malformed(e.to_string()))
                .and_then(TravelCsvRecord::into_new_travel),
        })
        .collect();

    Ok(rows)
}

impl TravelCsvRecord {
    fn into_new_travel(self) -> Result<NewTravelInfo, CsvImportError> {
        let guest_id = match non_empty(self.guest_id) {
            Some(raw) => raw.parse::<i64>().map_err(|e| invalid("guest_id", &raw, e))?,
            None => return Err(invalid("guest_id", "", "value is required")),
        };

        let transport_mode = match non_empty(self.transport_mode) {
            Some(raw) => raw
                .parse::<TransportMode>()
                .map_err(|e| invalid("transport_mode", &raw, e))?,
            None => TransportMode::Air,
        };

        let flight_status = match non_empty(self.flight_status) {
            Some(raw) => raw
                .parse::<FlightStatus>()
                .map_err(|e| invalid("flight_status", &raw, e))?,
            None => FlightStatus::Scheduled,
        };

        let arrival_date = non_empty(self.arrival_date)
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|e| invalid("arrival_date", &raw, e))
            })
            .transpose()?;

        let arrival_time = non_empty(self.arrival_time)
            .map(|raw| parse_time(&raw))
            .transpose()?;

        let flight_number = non_empty(self.flight_number)
            .map(|raw| {
                if FLIGHT_NUMBER_REGEX.is_match(&raw) {
                    Ok(raw.to_ascii_uppercase())
                } else {
                    Err(invalid("flight_number", &raw, "not a flight number"))
                }
            })
            .transpose()?;

        let needs_transportation = non_empty(self.needs_transportation)
            .map(|raw| parse_flag(&raw))
            .transpose()?
            .unwrap_or(false);

        Ok(NewTravelInfo {
            guest_id,
            transport_mode,
            arrival_date,
            arrival_time,
            arrival_location: non_empty(self.arrival_location),
            flight_number,
            needs_transportation,
            flight_status,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn invalid(field: &'static str, value: &str, reason: impl ToString) -> CsvImportError {
    CsvImportError::InvalidField {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, CsvImportError> {
    parse_arrival_time(raw).ok_or_else(|| invalid("arrival_time", raw, "expected HH:MM"))
}

fn parse_flag(raw: &str) -> Result<bool, CsvImportError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(invalid("needs_transportation", raw, "expected yes/no")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "guest_id,transport_mode,arrival_date,arrival_time,arrival_location,flight_number,needs_transportation,flight_status";

    fn csv(rows: &[&str]) -> Vec<u8> {
        let mut doc = String::from(HEADER);
        for row in rows {
            doc.push('\n');
            doc.push_str(row);
        }
        doc.into_bytes()
    }

    #[test]
    fn test_parse_complete_row() {
        let data = csv(&["7,air,2026-06-12,13:10,LIS,tp1351,yes,confirmed"]);

        let rows = parse_travel_csv(&data).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row, 1);

        let info = rows[0].result.as_ref().unwrap();
        assert_eq!(info.guest_id, 7);
        assert_eq!(info.transport_mode, TransportMode::Air);
        assert_eq!(info.arrival_date, NaiveDate::from_ymd_opt(2026, 6, 12));
        assert_eq!(info.arrival_time, NaiveTime::from_hms_opt(13, 10, 0));
        assert_eq!(info.arrival_location.as_deref(), Some("LIS"));
        assert_eq!(info.flight_number.as_deref(), Some("TP1351"));
        assert!(info.needs_transportation);
        assert_eq!(info.flight_status, FlightStatus::Confirmed);
    }

    #[test]
    fn test_empty_fields_use_defaults() {
        let data = csv(&["8,,,,,,,"]);

        let rows = parse_travel_csv(&data).unwrap();
        let info = rows[0].result.as_ref().unwrap();

        assert_eq!(info.transport_mode, TransportMode::Air);
        assert_eq!(info.flight_status, FlightStatus::Scheduled);
        assert!(info.arrival_date.is_none());
        assert!(info.arrival_time.is_none());
        assert!(info.arrival_location.is_none());
        assert!(!info.needs_transportation);
    }

    #[test]
    fn test_bad_rows_do_not_stop_good_ones() {
        let data = csv(&[
            "1,air,2026-06-12,25:00,LIS,TP1351,yes,confirmed",
            "2,air,2026-06-12,13:10:00,LIS,TP1351,no,delayed",
            "abc,air,,,,,,",
            "3,boat,,,,,,",
        ]);

        let rows = parse_travel_csv(&data).unwrap();
        assert_eq!(rows.len(), 4);

        assert!(matches!(
            rows[0].result,
            Err(CsvImportError::InvalidField { field: "arrival_time", .. })
        ));
        assert!(rows[1].result.is_ok());
        assert!(matches!(
            rows[2].result,
            Err(CsvImportError::InvalidField { field: "guest_id", .. })
        ));
        assert!(matches!(
            rows[3].result,
            Err(CsvImportError::InvalidField { field: "transport_mode", .. })
        ));
    }

    #[test]
    fn test_missing_columns_rejects_file() {
        let data = b"guest_id,arrival_date\n1,2026-06-12".to_vec();

        match parse_travel_csv(&data) {
            Err(CsvImportError::MissingColumns(missing)) => {
                assert!(missing.contains(&"arrival_time".to_string()));
                assert!(!missing.contains(&"guest_id".to_string()));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_flight_number() {
        let data = csv(&["4,air,2026-06-12,13:10,LIS,TAP-1351,yes,confirmed"]);

        let rows = parse_travel_csv(&data).unwrap();
        assert!(matches!(
            rows[0].result,
            Err(CsvImportError::InvalidField { field: "flight_number", .. })
        ));
    }

    #[test]
    fn test_error_maps_to_validation() {
        let err: AppError = CsvImportError::MissingColumns(vec!["guest_id".to_string()]).into();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
