//! PostgreSQL implementation of transport repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use super::decode_enum;
use crate::domain::entities::{
    GroupStatus, TransportAllocation, TransportGroup, TransportGroupPatch, VehicleType,
};
use crate::domain::planning::PlannedGroup;
use crate::domain::repositories::{PruneOutcome, SavedGroup, TransportRepository};
use crate::error::AppError;

const GROUP_COLUMNS: &str = "id, event_id, name, pickup_location, pickup_date, \
     pickup_time_slot, dropoff_location, vehicle_type, vehicle_count, vehicle_capacity, \
     status, transport_mode, generation_key, created_at, updated_at";

const ALLOCATION_COLUMNS: &str = "id, transport_group_id, guest_id, status, \
     includes_plus_one, includes_children, children_count, created_at";

#[derive(FromRow)]
struct GroupRow {
    id: i64,
    event_id: i64,
    name: String,
    pickup_location: String,
    pickup_date: NaiveDate,
    pickup_time_slot: String,
    dropoff_location: String,
    vehicle_type: String,
    vehicle_count: i32,
    vehicle_capacity: i32,
    status: String,
    transport_mode: String,
    generation_key: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct UpsertedGroupRow {
    #[sqlx(flatten)]
    group: GroupRow,
    inserted: bool,
}

#[derive(FromRow)]
struct AllocationRow {
    id: i64,
    transport_group_id: i64,
    guest_id: i64,
    status: String,
    includes_plus_one: bool,
    includes_children: bool,
    children_count: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<GroupRow> for TransportGroup {
    type Error = AppError;

    fn try_from(r: GroupRow) -> Result<Self, Self::Error> {
        Ok(TransportGroup {
            id: r.id,
            event_id: r.event_id,
            name: r.name,
            pickup_location: r.pickup_location,
            pickup_date: r.pickup_date,
            pickup_time_slot: r.pickup_time_slot,
            dropoff_location: r.dropoff_location,
            vehicle_type: decode_enum::<VehicleType>("vehicle_type", &r.vehicle_type)?,
            vehicle_count: r.vehicle_count,
            vehicle_capacity: r.vehicle_capacity,
            status: decode_enum::<GroupStatus>("status", &r.status)?,
            transport_mode: r.transport_mode,
            generation_key: r.generation_key,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

impl From<AllocationRow> for TransportAllocation {
    fn from(r: AllocationRow) -> Self {
        TransportAllocation {
            id: r.id,
            transport_group_id: r.transport_group_id,
            guest_id: r.guest_id,
            status: r.status,
            includes_plus_one: r.includes_plus_one,
            includes_children: r.includes_children,
            children_count: r.children_count,
            created_at: r.created_at,
        }
    }
}

/// PostgreSQL repository for transport groups and allocations.
///
/// Generated groups are written one transaction per group; a failure rolls
/// back that group and its allocations only.
pub struct PgTransportRepository {
    pool: Arc<PgPool>,
}

impl PgTransportRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransportRepository for PgTransportRepository {
    async fn save_generated_group(&self, planned: PlannedGroup) -> Result<SavedGroup, AppError> {
        let PlannedGroup { group, allocations } = planned;
        let guest_ids: Vec<i64> = allocations.iter().map(|a| a.guest_id).collect();

        let mut tx = self.pool.begin().await?;

        // Drafts take the planned sizing. Reviewed groups keep the operator's
        // vehicle type and capacity, adding vehicles until every guest has a seat.
        let upsert_sql = format!(
            r#"
            INSERT INTO transport_groups
                (event_id, name, pickup_location, pickup_date, pickup_time_slot,
                 dropoff_location, vehicle_type, vehicle_count, vehicle_capacity,
                 status, transport_mode, generation_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'draft', $10, $11)
            ON CONFLICT (generation_key) DO UPDATE SET
                name = EXCLUDED.name,
                dropoff_location = EXCLUDED.dropoff_location,
                vehicle_type = CASE WHEN transport_groups.status = 'draft'
                    THEN EXCLUDED.vehicle_type ELSE transport_groups.vehicle_type END,
                vehicle_count = CASE
                    WHEN transport_groups.status = 'draft' THEN EXCLUDED.vehicle_count
                    WHEN transport_groups.vehicle_capacity > 0 THEN GREATEST(
                        transport_groups.vehicle_count,
                        CEIL($12::numeric / transport_groups.vehicle_capacity)::int
                    )
                    ELSE EXCLUDED.vehicle_count END,
                vehicle_capacity = CASE
                    WHEN transport_groups.status = 'draft' OR transport_groups.vehicle_capacity = 0
                    THEN EXCLUDED.vehicle_capacity ELSE transport_groups.vehicle_capacity END,
                updated_at = NOW()
            RETURNING {GROUP_COLUMNS}, (xmax = 0) AS inserted
            "#
        );

        let row = sqlx::query_as::<_, UpsertedGroupRow>(&upsert_sql)
            .bind(group.event_id)
            .bind(&group.name)
            .bind(&group.pickup_location)
            .bind(group.pickup_date)
            .bind(&group.pickup_time_slot)
            .bind(&group.dropoff_location)
            .bind(group.vehicle_type.as_str())
            .bind(group.vehicle_count)
            .bind(group.vehicle_capacity)
            .bind(&group.transport_mode)
            .bind(&group.generation_key)
            .bind(guest_ids.len() as i32)
            .fetch_one(&mut *tx)
            .await?;

        let created = row.inserted;
        let saved: TransportGroup = row.group.try_into()?;

        sqlx::query(
            r#"
            DELETE FROM transport_allocations
            WHERE transport_group_id = $1
              AND NOT (guest_id = ANY($2))
            "#,
        )
        .bind(saved.id)
        .bind(&guest_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM transport_allocations a
            USING transport_groups g
            WHERE a.transport_group_id = g.id
              AND g.event_id = $1
              AND g.generation_key IS NOT NULL
              AND g.id <> $2
              AND a.guest_id = ANY($3)
            "#,
        )
        .bind(saved.event_id)
        .bind(saved.id)
        .bind(&guest_ids)
        .execute(&mut *tx)
        .await?;

        for allocation in &allocations {
            sqlx::query(
                r#"
                INSERT INTO transport_allocations
                    (transport_group_id, guest_id, status, includes_plus_one,
                     includes_children, children_count)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (transport_group_id, guest_id) DO NOTHING
                "#,
            )
            .bind(saved.id)
            .bind(allocation.guest_id)
            .bind(&allocation.status)
            .bind(allocation.includes_plus_one)
            .bind(allocation.includes_children)
            .bind(allocation.children_count)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(SavedGroup {
            group: saved,
            created,
            allocations: allocations.len(),
        })
    }

    async fn prune_generated(
        &self,
        event_id: i64,
        keep_guest_ids: Vec<i64>,
    ) -> Result<PruneOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        let allocations = sqlx::query(
            r#"
            DELETE FROM transport_allocations a
            USING transport_groups g
            WHERE a.transport_group_id = g.id
              AND g.event_id = $1
              AND g.generation_key IS NOT NULL
              AND g.status = 'draft'
              AND NOT (a.guest_id = ANY($2))
            "#,
        )
        .bind(event_id)
        .bind(&keep_guest_ids)
        .execute(&mut *tx)
        .await?;

        let groups = sqlx::query(
            r#"
            DELETE FROM transport_groups g
            WHERE g.event_id = $1
              AND g.generation_key IS NOT NULL
              AND g.status = 'draft'
              AND NOT EXISTS (
                  SELECT 1 FROM transport_allocations a WHERE a.transport_group_id = g.id
              )
            "#,
        )
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(PruneOutcome {
            allocations_removed: allocations.rows_affected(),
            groups_removed: groups.rows_affected(),
        })
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<TransportGroup>, AppError> {
        let sql = format!(
            r#"
            SELECT {GROUP_COLUMNS}
            FROM transport_groups
            WHERE event_id = $1
            ORDER BY pickup_date, pickup_time_slot, pickup_location, id
            "#
        );

        let rows = sqlx::query_as::<_, GroupRow>(&sql)
            .bind(event_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TransportGroup>, AppError> {
        let sql = format!("SELECT {GROUP_COLUMNS} FROM transport_groups WHERE id = $1");

        let row = sqlx::query_as::<_, GroupRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_allocations(&self, group_id: i64) -> Result<Vec<TransportAllocation>, AppError> {
        let sql = format!(
            r#"
            SELECT {ALLOCATION_COLUMNS}
            FROM transport_allocations
            WHERE transport_group_id = $1
            ORDER BY guest_id
            "#
        );

        let rows = sqlx::query_as::<_, AllocationRow>(&sql)
            .bind(group_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        id: i64,
        patch: TransportGroupPatch,
    ) -> Result<Option<TransportGroup>, AppError> {
        let sql = format!(
            r#"
            UPDATE transport_groups SET
                name = COALESCE($2, name),
                pickup_location = COALESCE($3, pickup_location),
                pickup_date = COALESCE($4, pickup_date),
                pickup_time_slot = COALESCE($5, pickup_time_slot),
                dropoff_location = COALESCE($6, dropoff_location),
                vehicle_type = COALESCE($7, vehicle_type),
                vehicle_count = COALESCE($8, vehicle_count),
                vehicle_capacity = COALESCE($9, vehicle_capacity),
                status = COALESCE($10, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {GROUP_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, GroupRow>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.pickup_location)
            .bind(patch.pickup_date)
            .bind(patch.pickup_time_slot)
            .bind(patch.dropoff_location)
            .bind(patch.vehicle_type.map(|v| v.as_str()))
            .bind(patch.vehicle_count)
            .bind(patch.vehicle_capacity)
            .bind(patch.status.map(|s| s.as_str()))
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM transport_groups WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_status(&self, event_id: i64, status: GroupStatus) -> Result<u64, AppError> {
        let result =
            sqlx::query("DELETE FROM transport_groups WHERE event_id = $1 AND status = $2")
                .bind(event_id)
                .bind(status.as_str())
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected())
    }
}
