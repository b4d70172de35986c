//! Turns bucketed arrivals into transport groups ready to be written.

use crate::domain::entities::{
    GuestTravelRecord, NewAllocation, NewTransportGroup, SHUTTLE_MODE, WeddingEvent,
};

use super::slots::{BucketKey, TimeSlotBucket, bucket_arrivals};
use super::vehicles::assign_vehicles;

/// Display name of a generated group.
pub fn group_name(location: &str, slot_label: &str) -> String {
    format!("Flight Pickup - {location} {slot_label}")
}

/// Idempotency key of the group generated for `key` within `event_id`.
pub fn generation_key(event_id: i64, key: &BucketKey) -> String {
    format!("{event_id}:{key}")
}

/// One group and the allocations that belong to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedGroup {
    pub group: NewTransportGroup,
    pub allocations: Vec<NewAllocation>,
}

/// Everything the writer needs for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    pub buffer_minutes: u32,
    pub groups: Vec<PlannedGroup>,
    pub skipped: Vec<i64>,
    pub examined: usize,
}

impl GenerationPlan {
    pub fn guests_grouped(&self) -> usize {
        self.groups.iter().map(|g| g.allocations.len()).sum()
    }
}

/// Buckets the event's arrivals and sizes vehicles for each bucket.
pub fn plan_generation(event: &WeddingEvent, records: &[GuestTravelRecord]) -> GenerationPlan {
    let buffer_minutes = event.buffer_minutes();
    let buckets = bucket_arrivals(records, buffer_minutes);
    let dropoff = event.dropoff_location();

    let groups = buckets
        .buckets
        .iter()
        .filter_map(|bucket| plan_group(event.id, &dropoff, bucket))
        .collect();

    GenerationPlan {
        buffer_minutes,
        groups,
        skipped: buckets.skipped,
        examined: buckets.examined,
    }
}

fn plan_group(event_id: i64, dropoff: &str, bucket: &TimeSlotBucket) -> Option<PlannedGroup> {
    let vehicles = assign_vehicles(bucket.len())?;
    let key = &bucket.key;

    let group = NewTransportGroup {
        event_id,
        name: group_name(&key.location, &key.slot_label),
        pickup_location: key.location.clone(),
        pickup_date: key.arrival_date,
        pickup_time_slot: key.slot_label.clone(),
        dropoff_location: dropoff.to_string(),
        vehicle_type: vehicles.vehicle_type,
        vehicle_count: vehicles.vehicle_count as i32,
        vehicle_capacity: vehicles.vehicle_capacity as i32,
        transport_mode: SHUTTLE_MODE.to_string(),
        generation_key: Some(generation_key(event_id, key)),
    };

    let allocations = bucket
        .guests
        .iter()
        .map(|g| NewAllocation::pending(g.guest_id))
        .collect();

    Some(PlannedGroup { group, allocations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FlightStatus, VehicleType};
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn event(hotel: Option<&str>, buffer: Option<&str>) -> WeddingEvent {
        WeddingEvent {
            id: 9,
            name: "Summer wedding".to_string(),
            location: Some("Sintra".to_string()),
            hotel_name: hotel.map(str::to_string),
            transport_buffer_time: buffer.map(str::to_string),
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn arrival(guest_id: i64, h: u32, m: u32) -> GuestTravelRecord {
        GuestTravelRecord {
            guest_id,
            arrival_date: NaiveDate::from_ymd_opt(2026, 6, 12),
            arrival_time: NaiveTime::from_hms_opt(h, m, 0),
            arrival_location: Some("LIS".to_string()),
            flight_number: None,
            needs_transportation: true,
            flight_status: FlightStatus::Confirmed,
        }
    }

    #[test]
    fn test_group_name_and_key() {
        let key = BucketKey {
            location: "LIS".to_string(),
            arrival_date: NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
            slot_label: "13:30".to_string(),
        };

        assert_eq!(group_name("LIS", "13:30"), "Flight Pickup - LIS 13:30");
        assert_eq!(generation_key(9, &key), "9:LIS_2026-06-12_13:30");
    }

    #[test]
    fn test_plan_builds_draft_shuttle_groups() {
        let records: Vec<_> = (1..=5).map(|id| arrival(id, 13, 10)).collect();

        let plan = plan_generation(&event(Some("Tivoli"), None), &records);

        assert_eq!(plan.buffer_minutes, 30);
        assert_eq!(plan.groups.len(), 1);

        let planned = &plan.groups[0];
        assert_eq!(planned.group.name, "Flight Pickup - LIS 13:30");
        assert_eq!(planned.group.dropoff_location, "Tivoli");
        assert_eq!(planned.group.transport_mode, "shuttle");
        assert_eq!(planned.group.vehicle_type, VehicleType::Suv);
        assert_eq!(planned.group.vehicle_count, 1);
        assert_eq!(planned.group.vehicle_capacity, 6);
        assert_eq!(planned.allocations.len(), 5);
        assert!(planned.allocations.iter().all(|a| a.status == "pending"));
        assert_eq!(plan.guests_grouped(), 5);
    }

    #[test]
    fn test_plan_uses_event_buffer() {
        let records = vec![arrival(1, 13, 5)];

        let plan = plan_generation(&event(None, Some("00:10")), &records);

        assert_eq!(plan.buffer_minutes, 10);
        assert_eq!(plan.groups[0].group.pickup_time_slot, "13:00");
        assert_eq!(plan.groups[0].group.dropoff_location, "Sintra");
    }

    #[test]
    fn test_plan_reports_skipped() {
        let mut missing = arrival(2, 10, 0);
        missing.arrival_time = None;

        let plan = plan_generation(&event(None, None), &[arrival(1, 10, 0), missing]);

        assert_eq!(plan.skipped, vec![2]);
        assert_eq!(plan.examined, 2);
        assert_eq!(plan.guests_grouped(), 1);
    }

    #[test]
    fn test_capacity_covers_each_group() {
        let records: Vec<_> = (1..=40).map(|id| arrival(id, 9 + (id as u32 % 3), 0)).collect();

        let plan = plan_generation(&event(None, None), &records);

        for planned in &plan.groups {
            let seats = planned.group.vehicle_count * planned.group.vehicle_capacity;
            assert!(seats as usize >= planned.allocations.len());
        }
    }
}
