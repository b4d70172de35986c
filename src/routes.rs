//! Assembles the full application router.
//!
//! `/health` is public with a relaxed rate limit. Everything under `/api`
//! needs a bearer token and sits behind the stricter limiter. Every request
//! gets an `http` tracing span, and trailing slashes are trimmed before
//! routing.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// `behind_proxy` makes the rate limiters key on forwarded client addresses
/// instead of the socket peer. Only set it behind a proxy you control.
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer(behind_proxy));

    let health_router = Router::new()
        .route("/health", get(health_handler))
        .layer(rate_limit::layer(behind_proxy));

    let app = Router::new()
        .merge(health_router)
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(app)
}
