//! Repository trait for transport groups and their allocations.

use crate::domain::entities::{GroupStatus, TransportAllocation, TransportGroup, TransportGroupPatch};
use crate::domain::planning::PlannedGroup;
use crate::error::AppError;
use async_trait::async_trait;

/// Result of writing one generated group.
#[derive(Debug, Clone)]
pub struct SavedGroup {
    pub group: TransportGroup,
    /// `true` if the group was inserted, `false` if an existing one was updated.
    pub created: bool,
    pub allocations: usize,
}

/// Result of removing stale generated data for an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    pub allocations_removed: u64,
    pub groups_removed: u64,
}

/// Repository interface for transport groups.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTransportRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_transport.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransportRepository: Send + Sync {
    /// Writes a generated group and its allocations in one transaction.
    ///
    /// The group is upserted by its generation key. Existing status is never
    /// changed. After the call the group's allocations are exactly the planned
    /// guests, and none of those guests keeps an allocation in another
    /// generated group of the same event. Any failure rolls the whole group back.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a referenced guest does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save_generated_group(&self, planned: PlannedGroup) -> Result<SavedGroup, AppError>;

    /// Cleans generated draft groups of an event after a generation run.
    ///
    /// Removes allocations of guests not in `keep_guest_ids` from the event's
    /// generated draft groups, then deletes generated draft groups left empty.
    /// Groups an operator moved past draft are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn prune_generated(
        &self,
        event_id: i64,
        keep_guest_ids: Vec<i64>,
    ) -> Result<PruneOutcome, AppError>;

    /// Lists an event's groups ordered by pickup date, slot and location.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_event(&self, event_id: i64) -> Result<Vec<TransportGroup>, AppError>;

    /// Finds a group by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<TransportGroup>, AppError>;

    /// Lists the allocations of a group in guest order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_allocations(&self, group_id: i64) -> Result<Vec<TransportAllocation>, AppError>;

    /// Applies an operator edit.
    ///
    /// Returns `Ok(None)` if the group does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(
        &self,
        id: i64,
        patch: TransportGroupPatch,
    ) -> Result<Option<TransportGroup>, AppError>;

    /// Deletes a group; allocations cascade.
    ///
    /// Returns `Ok(false)` if the group did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Deletes all of an event's groups in `status`, returning how many went.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_status(&self, event_id: i64, status: GroupStatus) -> Result<u64, AppError>;
}
