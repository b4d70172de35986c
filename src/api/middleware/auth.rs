//! Bearer token authentication for `/api` routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;
use tracing::Span;

use crate::{error::AppError, state::AppState};

type BearerRejection = <AuthBearer as FromRequestParts<AppState>>::Rejection;

/// Rejects requests without a live API token.
///
/// The token name is recorded on the enclosing `http` span so access logs
/// show which credential made the call. Failures render as `401` with
/// `WWW-Authenticate: Bearer`.
///
/// ```rust,ignore
/// let api = api::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    bearer: Result<AuthBearer, BearerRejection>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let AuthBearer(token) = bearer.map_err(|_| {
        tracing::debug!(
            method = %req.method(),
            path = %req.uri().path(),
            "Request without bearer token"
        );
        AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Authorization header is missing or invalid" }),
        )
    })?;

    let api_token = state.auth_service.authenticate(&token).await?;
    Span::current().record("token", api_token.name.as_str());

    Ok(next.run(req).await)
}
