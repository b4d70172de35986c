//! Tower and axum middleware applied in [`crate::routes`].

pub mod auth;
pub mod rate_limit;
pub mod tracing;
