//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod events;
pub mod guests;
pub mod health;
pub mod transport;
pub mod travel;

pub use events::{
    create_event_handler, get_event_handler, list_events_handler, update_event_handler,
};
pub use guests::{create_guest_handler, list_guests_handler};
pub use health::health_handler;
pub use transport::{
    delete_draft_groups_handler, delete_group_handler, generate_transport_handler,
    get_group_handler, list_groups_handler, update_group_handler,
};
pub use travel::{
    get_travel_handler, import_travel_handler, list_event_travel_handler, put_travel_handler,
};
