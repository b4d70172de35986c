//! Business logic services for the application layer.

pub mod auth_service;
pub mod event_service;
pub mod guest_service;
pub mod transport_service;
pub mod travel_import;
pub mod travel_service;

pub use auth_service::{AuthService, hash_token};
pub use event_service::EventService;
pub use guest_service::GuestService;
pub use transport_service::{GenerationReport, TransportService};
pub use travel_import::CsvImportError;
pub use travel_service::{ImportReport, ImportRowError, TravelService};
