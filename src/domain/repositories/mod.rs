//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated with
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`EventRepository`] - Wedding events and their transport settings
//! - [`GuestRepository`] - Guests of an event
//! - [`TravelRepository`] - Guest travel records and the flight arrival accessor
//! - [`TransportRepository`] - Transport groups, allocations and the generation writer
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod event_repository;
pub mod guest_repository;
pub mod token_repository;
pub mod transport_repository;
pub mod travel_repository;

pub use event_repository::EventRepository;
pub use guest_repository::GuestRepository;
pub use token_repository::TokenRepository;
pub use transport_repository::{PruneOutcome, SavedGroup, TransportRepository};
pub use travel_repository::TravelRepository;

#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use guest_repository::MockGuestRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use transport_repository::MockTransportRepository;
#[cfg(test)]
pub use travel_repository::MockTravelRepository;
