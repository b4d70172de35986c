//! Services behind the HTTP handlers and the admin CLI.
//!
//! Each service is generic over the repository traits it needs, so unit tests
//! run against `mockall` mocks.
//!
//! - [`services::EventService`] - events and their transport settings
//! - [`services::GuestService`] - guest registration and paging
//! - [`services::TravelService`] - travel records and CSV import
//! - [`services::TransportService`] - flight-driven generation and group edits
//! - [`services::AuthService`] - bearer token checks

pub mod services;
