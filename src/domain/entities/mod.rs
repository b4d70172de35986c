//! Core domain entities.
//!
//! Entities are plain data structures; persistence rows are mapped into them
//! by the infrastructure layer.
//!
//! # Entity Types
//!
//! - [`WeddingEvent`] - An event with its transport settings
//! - [`Guest`] - An invited person
//! - [`TravelInfo`] / [`GuestTravelRecord`] - Arrival details of a guest
//! - [`TransportGroup`] - A shuttle pickup unit with vehicles
//! - [`TransportAllocation`] - A guest seated in a transport group
//! - [`ApiToken`] - Credential for the API
//!
//! Creation inputs use separate `New*` structs and partial updates use `*Patch`.

pub mod allocation;
pub mod api_token;
pub mod event;
pub mod guest;
pub mod transport_group;
pub mod travel;

pub use allocation::{NewAllocation, TransportAllocation};
pub use api_token::ApiToken;
pub use event::{EventPatch, NewEvent, WeddingEvent};
pub use guest::{Guest, NewGuest};
pub use transport_group::{
    GroupStatus, NewTransportGroup, SHUTTLE_MODE, TransportGroup, TransportGroupPatch, VehicleType,
};
pub use travel::{
    FLIGHT_NUMBER_REGEX, FlightStatus, GuestTravelRecord, NewTravelInfo, TransportMode, TravelInfo,
    UnknownVariant, parse_arrival_time,
};
