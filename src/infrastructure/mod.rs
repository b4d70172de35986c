//! Implementations of the domain traits against PostgreSQL and Redis.
//!
//! - [`persistence`] - `Pg*Repository` types over a shared `PgPool`
//! - [`lock`] - per-event generation locks, Redis-backed or in-process

pub mod lock;
pub mod persistence;
