//! Flight-driven transport planning.
//!
//! Pure computation, no I/O. The pipeline is:
//!
//! 1. [`buffer`] - read the event's pickup buffer (`HH:MM`, default 30 minutes)
//! 2. [`slots`] - bucket arrivals by location, date and 30-minute pickup slot
//! 3. [`vehicles`] - size each bucket with the fixed vehicle thresholds
//! 4. [`plan`] - produce draft groups and pending allocations for the writer
//!
//! Persistence of the plan lives in
//! [`crate::application::services::TransportService`].

pub mod buffer;
pub mod plan;
pub mod slots;
pub mod vehicles;

pub use plan::{GenerationPlan, PlannedGroup, generation_key, group_name, plan_generation};
pub use slots::{BucketKey, BucketPlan, TimeSlotBucket, bucket_arrivals};
pub use vehicles::{VehicleAssignment, assign_vehicles};
