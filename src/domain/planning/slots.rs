//! Arrival time-slot bucketing.
//!
//! Guests are clustered by arrival location, arrival date and the 30-minute
//! slot their pickup falls into. Pickup is arrival plus the event's buffer.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::entities::GuestTravelRecord;

/// Width of a pickup slot.
pub const SLOT_MINUTES: u32 = 30;

/// Location label used when a record has no arrival location.
pub const UNSPECIFIED_LOCATION: &str = "Unspecified";

/// Composite bucket identity.
///
/// Ordering is (location, date, slot), which is also the order buckets are
/// returned and written in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub location: String,
    pub arrival_date: NaiveDate,
    pub slot_label: String,
}

impl fmt::Display for BucketKey {
    /// Renders as `{location}_{YYYY-MM-DD}_{HH:MM}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.location,
            self.arrival_date.format("%Y-%m-%d"),
            self.slot_label
        )
    }
}

/// Computed pickup moment and the slot it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupSlot {
    pub pickup_at: NaiveDateTime,
    pub label: String,
}

/// Quantizes a pickup timestamp to its slot label.
///
/// Minutes `< 30` map to `:00`, the rest to `:30`; the hour is the pickup hour.
pub fn slot_label(pickup_at: NaiveDateTime) -> String {
    let slot_minute = if pickup_at.minute() < SLOT_MINUTES {
        0
    } else {
        SLOT_MINUTES
    };
    format!("{:02}:{:02}", pickup_at.hour(), slot_minute)
}

/// Pickup time and slot for an arrival.
pub fn pickup_slot(date: NaiveDate, time: NaiveTime, buffer_minutes: u32) -> PickupSlot {
    let pickup_at = date.and_time(time) + Duration::minutes(i64::from(buffer_minutes));
    PickupSlot {
        label: slot_label(pickup_at),
        pickup_at,
    }
}

/// Guests sharing one pickup slot.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlotBucket {
    pub key: BucketKey,
    /// Guests in input order.
    pub guests: Vec<GuestTravelRecord>,
}

impl TimeSlotBucket {
    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn guest_ids(&self) -> Vec<i64> {
        self.guests.iter().map(|g| g.guest_id).collect()
    }
}

/// Output of [`bucket_arrivals`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketPlan {
    /// Non-empty buckets in key order.
    pub buckets: Vec<TimeSlotBucket>,
    /// Guests left out for missing arrival date or time, in input order.
    pub skipped: Vec<i64>,
    /// Number of records examined, skipped ones included.
    pub examined: usize,
}

impl BucketPlan {
    /// Number of guests placed in a bucket.
    pub fn grouped(&self) -> usize {
        self.buckets.iter().map(TimeSlotBucket::len).sum()
    }
}

/// Partitions arrival records into pickup buckets.
///
/// Records without `arrival_date` or `arrival_time` go to
/// [`BucketPlan::skipped`]. Everything else lands in exactly one bucket.
///
/// A pickup that crosses midnight keeps the arrival date in its key while the
/// slot label carries the rolled-over hour.
pub fn bucket_arrivals(records: &[GuestTravelRecord], buffer_minutes: u32) -> BucketPlan {
    let mut buckets: BTreeMap<BucketKey, Vec<GuestTravelRecord>> = BTreeMap::new();
    let mut skipped = Vec::new();

    for record in records {
        let (Some(date), Some(time)) = (record.arrival_date, record.arrival_time) else {
            skipped.push(record.guest_id);
            continue;
        };

        let slot = pickup_slot(date, time, buffer_minutes);
        if slot.pickup_at.date() != date {
            tracing::warn!(
                guest_id = record.guest_id,
                arrival_date = %date,
                pickup_at = %slot.pickup_at,
                "Pickup crosses midnight, keeping arrival date in bucket"
            );
        }

        let key = BucketKey {
            location: location_label(record.arrival_location.as_deref()),
            arrival_date: date,
            slot_label: slot.label,
        };

        buckets.entry(key).or_default().push(record.clone());
    }

    BucketPlan {
        buckets: buckets
            .into_iter()
            .map(|(key, guests)| TimeSlotBucket { key, guests })
            .collect(),
        skipped,
        examined: records.len(),
    }
}

fn location_label(raw: Option<&str>) -> String {
    match raw {
        Some(location) if !location.trim().is_empty() => location.to_string(),
        _ => UNSPECIFIED_LOCATION.to_string(),
    }
}
