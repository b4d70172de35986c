//! Transport group generation and management service.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;

use super::event_service::event_not_found;
use crate::domain::entities::{
    GroupStatus, TransportAllocation, TransportGroup, TransportGroupPatch, WeddingEvent,
};
use crate::domain::planning::plan_generation;
use crate::domain::repositories::{EventRepository, TransportRepository, TravelRepository};
use crate::error::AppError;
use crate::infrastructure::lock::GenerationLock;

/// Summary of one flight-driven generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub groups_created: usize,
    pub groups_updated: usize,
    /// Records returned by the arrival accessor, skipped ones included.
    pub guests_processed: usize,
    pub guests_grouped: usize,
    pub buffer_minutes: u32,
    /// Guests left out for missing arrival date or time.
    pub skipped: Vec<i64>,
    /// Stale generated draft groups deleted after the run.
    pub groups_removed: u64,
}

/// Service owning transport groups of events.
///
/// Generation reads confirmed flight arrivals, buckets them into 30-minute
/// pickup slots, sizes vehicles and writes one draft shuttle group per bucket.
/// Runs are idempotent and serialized per event through a [`GenerationLock`].
pub struct TransportService<E: EventRepository, T: TravelRepository, R: TransportRepository> {
    event_repository: Arc<E>,
    travel_repository: Arc<T>,
    transport_repository: Arc<R>,
    lock: Arc<dyn GenerationLock>,
}

impl<E, T, R> TransportService<E, T, R>
where
    E: EventRepository,
    T: TravelRepository,
    R: TransportRepository,
{
    pub fn new(
        event_repository: Arc<E>,
        travel_repository: Arc<T>,
        transport_repository: Arc<R>,
        lock: Arc<dyn GenerationLock>,
    ) -> Self {
        Self {
            event_repository,
            travel_repository,
            transport_repository,
            lock,
        }
    }

    /// Generates shuttle groups for an event from its flight arrivals.
    ///
    /// Each bucket is written in its own transaction. A failure stops the run
    /// and leaves earlier buckets committed; re-running converges.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the event does not exist.
    /// Returns [`AppError::Conflict`] if a generation for the event is already running.
    /// Returns [`AppError::Internal`] on database or lock backend errors.
    pub async fn generate_from_flights(&self, event_id: i64) -> Result<GenerationReport, AppError> {
        let event = self
            .event_repository
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| event_not_found(event_id))?;

        let lock_key = format!("transport-generation:{event_id}");
        let token = self
            .lock
            .try_acquire(&lock_key)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event_id, "Generation lock unavailable");
                AppError::internal("Generation lock unavailable", json!({}))
            })?
            .ok_or_else(|| {
                counter!("transport_generation_runs_total", "outcome" => "busy").increment(1);
                AppError::conflict(
                    "Transport generation already running for this event",
                    json!({ "event_id": event_id }),
                )
            })?;

        let result = self.run_generation(&event).await;

        if let Err(e) = self.lock.release(&token).await {
            tracing::warn!(error = %e, event_id, "Failed to release generation lock");
        }

        match &result {
            Ok(report) => {
                counter!("transport_generation_runs_total", "outcome" => "success").increment(1);
                counter!("transport_groups_created_total").increment(report.groups_created as u64);
                counter!("transport_groups_updated_total").increment(report.groups_updated as u64);
                counter!("transport_guests_skipped_total").increment(report.skipped.len() as u64);
                tracing::info!(
                    event_id,
                    created = report.groups_created,
                    updated = report.groups_updated,
                    removed = report.groups_removed,
                    processed = report.guests_processed,
                    grouped = report.guests_grouped,
                    skipped = report.skipped.len(),
                    "Transport generation finished"
                );
            }
            Err(e) => {
                counter!("transport_generation_runs_total", "outcome" => "error").increment(1);
                tracing::error!(error = %e, event_id, "Transport generation failed");
            }
        }

        result
    }

    async fn run_generation(&self, event: &WeddingEvent) -> Result<GenerationReport, AppError> {
        let records = self.travel_repository.find_flight_arrivals(event.id).await?;
        let plan = plan_generation(event, &records);

        tracing::debug!(
            event_id = event.id,
            buffer_minutes = plan.buffer_minutes,
            buckets = plan.groups.len(),
            "Generation plan ready"
        );

        let guests_grouped = plan.guests_grouped();
        let keep_guest_ids: Vec<i64> = plan
            .groups
            .iter()
            .flat_map(|g| g.allocations.iter().map(|a| a.guest_id))
            .collect();

        let mut report = GenerationReport {
            guests_processed: plan.examined,
            guests_grouped,
            buffer_minutes: plan.buffer_minutes,
            skipped: plan.skipped,
            ..Default::default()
        };

        for planned in plan.groups {
            let saved = self
                .transport_repository
                .save_generated_group(planned)
                .await?;

            if saved.created {
                report.groups_created += 1;
            } else {
                report.groups_updated += 1;
            }
        }

        let pruned = self
            .transport_repository
            .prune_generated(event.id, keep_guest_ids)
            .await?;
        report.groups_removed = pruned.groups_removed;

        Ok(report)
    }

    /// Lists an event's transport groups.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the event does not exist.
    pub async fn list_groups(&self, event_id: i64) -> Result<Vec<TransportGroup>, AppError> {
        self.ensure_event(event_id).await?;
        self.transport_repository.list_by_event(event_id).await
    }

    /// Returns a group together with its allocations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the group does not exist.
    pub async fn get_group(
        &self,
        id: i64,
    ) -> Result<(TransportGroup, Vec<TransportAllocation>), AppError> {
        let group = self.find_group(id).await?;
        let allocations = self.transport_repository.list_allocations(id).await?;
        Ok((group, allocations))
    }

    /// Applies an operator edit to a group.
    ///
    /// Status may only move forward along `draft -> pending -> confirmed`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the group does not exist.
    /// Returns [`AppError::Validation`] for a backward status transition.
    pub async fn update_group(
        &self,
        id: i64,
        patch: TransportGroupPatch,
    ) -> Result<TransportGroup, AppError> {
        if let Some(next) = patch.status {
            let current = self.find_group(id).await?;
            if !current.status.can_transition_to(next) {
                return Err(AppError::bad_request(
                    "Invalid status transition",
                    json!({ "from": current.status, "to": next }),
                ));
            }
        }

        let group = self
            .transport_repository
            .update(id, patch)
            .await?
            .ok_or_else(|| group_not_found(id))?;

        tracing::debug!(group_id = id, status = %group.status, "Transport group updated");
        Ok(group)
    }

    /// Deletes a group and its allocations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the group does not exist.
    pub async fn delete_group(&self, id: i64) -> Result<(), AppError> {
        if !self.transport_repository.delete(id).await? {
            return Err(group_not_found(id));
        }
        tracing::info!(group_id = id, "Transport group deleted");
        Ok(())
    }

    /// Deletes an event's draft groups, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the event does not exist.
    pub async fn delete_draft_groups(&self, event_id: i64) -> Result<u64, AppError> {
        self.ensure_event(event_id).await?;

        let deleted = self
            .transport_repository
            .delete_by_status(event_id, GroupStatus::Draft)
            .await?;

        tracing::info!(event_id, deleted, "Draft transport groups deleted");
        Ok(deleted)
    }

    async fn ensure_event(&self, event_id: i64) -> Result<(), AppError> {
        match self.event_repository.find_by_id(event_id).await? {
            Some(_) => Ok(()),
            None => Err(event_not_found(event_id)),
        }
    }

    async fn find_group(&self, id: i64) -> Result<TransportGroup, AppError> {
        self.transport_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| group_not_found(id))
    }
}

fn group_not_found(id: i64) -> AppError {
    AppError::not_found("Transport group not found", json!({ "group_id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FlightStatus, GuestTravelRecord, VehicleType};
    use crate::domain::planning::PlannedGroup;
    use crate::domain::repositories::{
        MockEventRepository, MockTransportRepository, MockTravelRepository, PruneOutcome,
        SavedGroup,
    };
    use crate::infrastructure::lock::LocalLock;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn sample_event(id: i64) -> WeddingEvent {
        WeddingEvent {
            id,
            name: "Ana & Luis".to_string(),
            location: Some("Sintra".to_string()),
            hotel_name: Some("Tivoli Sintra".to_string()),
            transport_buffer_time: Some("00:30".to_string()),
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn arrival(guest_id: i64, time: Option<(u32, u32)>, location: &str) -> GuestTravelRecord {
        GuestTravelRecord {
            guest_id,
            arrival_date: NaiveDate::from_ymd_opt(2026, 6, 12),
            arrival_time: time.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            arrival_location: Some(location.to_string()),
            flight_number: Some("TP1351".to_string()),
            needs_transportation: true,
            flight_status: FlightStatus::Confirmed,
        }
    }

    fn saved_from(planned: &PlannedGroup, id: i64, status: GroupStatus, created: bool) -> SavedGroup {
        let g = &planned.group;
        SavedGroup {
            group: TransportGroup {
                id,
                event_id: g.event_id,
                name: g.name.clone(),
                pickup_location: g.pickup_location.clone(),
                pickup_date: g.pickup_date,
                pickup_time_slot: g.pickup_time_slot.clone(),
                dropoff_location: g.dropoff_location.clone(),
                vehicle_type: g.vehicle_type,
                vehicle_count: g.vehicle_count,
                vehicle_capacity: g.vehicle_capacity,
                status,
                transport_mode: g.transport_mode.clone(),
                generation_key: g.generation_key.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            created,
            allocations: planned.allocations.len(),
        }
    }

    fn sample_group(id: i64, status: GroupStatus) -> TransportGroup {
        TransportGroup {
            id,
            event_id: 1,
            name: "Flight Pickup - LIS 13:30".to_string(),
            pickup_location: "LIS".to_string(),
            pickup_date: NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
            pickup_time_slot: "13:30".to_string(),
            dropoff_location: "Tivoli Sintra".to_string(),
            vehicle_type: VehicleType::Sedan,
            vehicle_count: 1,
            vehicle_capacity: 4,
            status,
            transport_mode: "shuttle".to_string(),
            generation_key: Some("1:LIS_2026-06-12_13:30".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        events: MockEventRepository,
        travel: MockTravelRepository,
        transport: MockTransportRepository,
        lock: Arc<dyn GenerationLock>,
    ) -> TransportService<MockEventRepository, MockTravelRepository, MockTransportRepository> {
        TransportService::new(
            Arc::new(events),
            Arc::new(travel),
            Arc::new(transport),
            lock,
        )
    }

    fn existing_event() -> MockEventRepository {
        let mut events = MockEventRepository::new();
        events
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_event(id))));
        events
    }

    #[tokio::test]
    async fn test_generate_buckets_and_reports() {
        let mut travel = MockTravelRepository::new();
        let mut transport = MockTransportRepository::new();

        travel.expect_find_flight_arrivals().times(1).returning(|_| {
            Ok(vec![
                arrival(1, Some((13, 10)), "LIS"),
                arrival(2, Some((13, 20)), "LIS"),
                arrival(3, Some((9, 0)), "OPO"),
                arrival(4, None, "LIS"),
            ])
        });

        transport
            .expect_save_generated_group()
            .times(2)
            .returning(|planned| Ok(saved_from(&planned, 1, GroupStatus::Draft, true)));
        transport
            .expect_prune_generated()
            .withf(|event_id, keep| *event_id == 1 && keep.len() == 3 && !keep.contains(&4))
            .times(1)
            .returning(|_, _| Ok(PruneOutcome::default()));

        let report = service(existing_event(), travel, transport, Arc::new(LocalLock::default()))
            .generate_from_flights(1)
            .await
            .unwrap();

        assert_eq!(report.groups_created, 2);
        assert_eq!(report.groups_updated, 0);
        assert_eq!(report.guests_processed, 4);
        assert_eq!(report.guests_grouped, 3);
        assert_eq!(report.buffer_minutes, 30);
        assert_eq!(report.skipped, vec![4]);
    }

    #[tokio::test]
    async fn test_generate_writes_draft_shuttle_groups() {
        let mut travel = MockTravelRepository::new();
        let mut transport = MockTransportRepository::new();

        travel
            .expect_find_flight_arrivals()
            .returning(|_| Ok((1..=5).map(|id| arrival(id, Some((13, 10)), "LIS")).collect()));

        transport
            .expect_save_generated_group()
            .withf(|planned| {
                let g = &planned.group;
                g.name == "Flight Pickup - LIS 13:30"
                    && g.pickup_time_slot == "13:30"
                    && g.dropoff_location == "Tivoli Sintra"
                    && g.transport_mode == "shuttle"
                    && g.vehicle_type == VehicleType::Suv
                    && g.vehicle_count == 1
                    && g.vehicle_capacity == 6
                    && g.generation_key.as_deref() == Some("1:LIS_2026-06-12_13:30")
                    && planned.allocations.len() == 5
            })
            .times(1)
            .returning(|planned| Ok(saved_from(&planned, 7, GroupStatus::Draft, true)));
        transport
            .expect_prune_generated()
            .returning(|_, _| Ok(PruneOutcome::default()));

        let report = service(existing_event(), travel, transport, Arc::new(LocalLock::default()))
            .generate_from_flights(1)
            .await
            .unwrap();

        assert_eq!(report.groups_created, 1);
        assert_eq!(report.guests_grouped, 5);
    }

    #[tokio::test]
    async fn test_second_run_updates_instead_of_creating() {
        let mut travel = MockTravelRepository::new();
        let mut transport = MockTransportRepository::new();

        travel
            .expect_find_flight_arrivals()
            .returning(|_| Ok(vec![arrival(1, Some((13, 10)), "LIS")]));
        transport
            .expect_save_generated_group()
            .returning(|planned| Ok(saved_from(&planned, 7, GroupStatus::Confirmed, false)));
        transport
            .expect_prune_generated()
            .returning(|_, _| Ok(PruneOutcome::default()));

        let report = service(existing_event(), travel, transport, Arc::new(LocalLock::default()))
            .generate_from_flights(1)
            .await
            .unwrap();

        assert_eq!(report.groups_created, 0);
        assert_eq!(report.groups_updated, 1);
    }

    #[tokio::test]
    async fn test_generate_unknown_event() {
        let mut events = MockEventRepository::new();
        events.expect_find_by_id().times(1).returning(|_| Ok(None));

        let mut travel = MockTravelRepository::new();
        travel.expect_find_flight_arrivals().times(0);

        let result = service(
            events,
            travel,
            MockTransportRepository::new(),
            Arc::new(LocalLock::default()),
        )
        .generate_from_flights(42)
        .await;

        match result.unwrap_err() {
            AppError::NotFound { message, .. } => assert_eq!(message, "Event not found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_refused_while_locked() {
        let lock = Arc::new(LocalLock::default());
        let held = lock
            .try_acquire("transport-generation:1")
            .await
            .unwrap()
            .unwrap();

        let mut travel = MockTravelRepository::new();
        travel.expect_find_flight_arrivals().times(0);

        let svc = service(
            existing_event(),
            travel,
            MockTransportRepository::new(),
            lock.clone(),
        );

        let result = svc.generate_from_flights(1).await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));

        lock.release(&held).await.unwrap();
    }

    #[tokio::test]
    async fn test_lock_released_after_failure() {
        let lock = Arc::new(LocalLock::default());
        let mut travel = MockTravelRepository::new();

        travel
            .expect_find_flight_arrivals()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let svc = service(
            existing_event(),
            travel,
            MockTransportRepository::new(),
            lock.clone(),
        );

        assert!(svc.generate_from_flights(1).await.is_err());
        assert!(
            lock.try_acquire("transport-generation:1")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_update_group_rejects_backward_status() {
        let mut transport = MockTransportRepository::new();
        transport
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_group(id, GroupStatus::Confirmed))));
        transport.expect_update().times(0);

        let patch = TransportGroupPatch {
            status: Some(GroupStatus::Draft),
            ..Default::default()
        };

        let result = service(
            MockEventRepository::new(),
            MockTravelRepository::new(),
            transport,
            Arc::new(LocalLock::default()),
        )
        .update_group(5, patch)
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_group_forward_status() {
        let mut transport = MockTransportRepository::new();
        transport
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_group(id, GroupStatus::Draft))));
        transport
            .expect_update()
            .times(1)
            .returning(|id, patch| Ok(Some(sample_group(id, patch.status.unwrap()))));

        let patch = TransportGroupPatch {
            status: Some(GroupStatus::Pending),
            ..Default::default()
        };

        let group = service(
            MockEventRepository::new(),
            MockTravelRepository::new(),
            transport,
            Arc::new(LocalLock::default()),
        )
        .update_group(5, patch)
        .await
        .unwrap();

        assert_eq!(group.status, GroupStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_missing_group() {
        let mut transport = MockTransportRepository::new();
        transport.expect_delete().times(1).returning(|_| Ok(false));

        let result = service(
            MockEventRepository::new(),
            MockTravelRepository::new(),
            transport,
            Arc::new(LocalLock::default()),
        )
        .delete_group(9)
        .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_draft_groups_only_targets_drafts() {
        let mut transport = MockTransportRepository::new();
        transport
            .expect_delete_by_status()
            .withf(|event_id, status| *event_id == 1 && *status == GroupStatus::Draft)
            .times(1)
            .returning(|_, _| Ok(3));

        let deleted = service(
            existing_event(),
            MockTravelRepository::new(),
            transport,
            Arc::new(LocalLock::default()),
        )
        .delete_draft_groups(1)
        .await
        .unwrap();

        assert_eq!(deleted, 3);
    }
}
