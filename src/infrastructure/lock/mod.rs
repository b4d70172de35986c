//! Per-event generation locking.
//!
//! Provides a [`GenerationLock`] trait with two implementations:
//! - [`RedisLock`] - Redis-backed, safe across several service instances
//! - [`LocalLock`] - In-process fallback for single-instance deployments and tests

mod local_lock;
mod redis_lock;
mod service;

pub use local_lock::LocalLock;
pub use redis_lock::RedisLock;
pub use service::{GenerationLock, LockError, LockResult, LockToken};
