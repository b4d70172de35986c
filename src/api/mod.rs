//! HTTP surface of the planner API.
//!
//! Handlers validate [`dto`] payloads, call the application services held in
//! [`crate::state::AppState`] and map entities back to response bodies.
//! [`routes`] lists the authenticated endpoints; the public `/health` route
//! and the middleware stack are assembled in [`crate::routes`].

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
