//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_event_handler, create_guest_handler, delete_draft_groups_handler,
    delete_group_handler, generate_transport_handler, get_event_handler, get_group_handler,
    get_travel_handler, import_travel_handler, list_event_travel_handler, list_events_handler,
    list_groups_handler, list_guests_handler, put_travel_handler, update_event_handler,
    update_group_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /events`                                    - List events
/// - `POST   /events`                                    - Create an event
/// - `GET    /events/{id}`                               - Get an event
/// - `PATCH  /events/{id}`                               - Update an event
/// - `GET    /events/{id}/guests`                        - List guests (paginated)
/// - `POST   /events/{id}/guests`                        - Add a guest
/// - `GET    /events/{id}/travel`                        - List guests' travel records
/// - `POST   /events/{id}/travel/import`                 - Import travel records from CSV
/// - `POST   /events/{id}/generate-transport-from-flights` - Generate shuttle groups
/// - `GET    /events/{id}/transport-groups`              - List transport groups
/// - `DELETE /events/{id}/transport-groups`              - Delete draft groups
/// - `GET    /guests/{id}/travel`                        - Get a guest's travel record
/// - `PUT    /guests/{id}/travel`                        - Create or replace a travel record
/// - `GET    /transport-groups/{id}`                     - Group with allocations
/// - `PATCH  /transport-groups/{id}`                     - Edit a group
/// - `DELETE /transport-groups/{id}`                     - Delete a group
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(list_events_handler).post(create_event_handler),
        )
        .route(
            "/events/{id}",
            get(get_event_handler).patch(update_event_handler),
        )
        .route(
            "/events/{id}/guests",
            get(list_guests_handler).post(create_guest_handler),
        )
        .route("/events/{id}/travel", get(list_event_travel_handler))
        .route("/events/{id}/travel/import", post(import_travel_handler))
        .route(
            "/events/{id}/generate-transport-from-flights",
            post(generate_transport_handler),
        )
        .route(
            "/events/{id}/transport-groups",
            get(list_groups_handler).delete(delete_draft_groups_handler),
        )
        .route(
            "/guests/{id}/travel",
            put(put_travel_handler).get(get_travel_handler),
        )
        .route(
            "/transport-groups/{id}",
            get(get_group_handler)
                .patch(update_group_handler)
                .delete(delete_group_handler),
        )
}
