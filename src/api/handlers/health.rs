//! Liveness and dependency probe.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthChecks, HealthResponse, Probe, ServiceStatus};
use crate::state::AppState;

/// `GET /health`
///
/// Probes the database and the generation lock backend concurrently.
/// Answers `200` when both pass and `503` otherwise, with the same body:
///
/// ```json
/// {
///   "status": "degraded",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "connected" },
///     "lock": { "status": "error", "message": "redis backend unreachable" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (database, lock) = tokio::join!(probe_database(&state), probe_lock(&state));

    let checks = HealthChecks { database, lock };
    let status = checks.overall();
    if status == ServiceStatus::Degraded {
        tracing::warn!(?checks, "Health check degraded");
    }

    let code = match status {
        ServiceStatus::Healthy => StatusCode::OK,
        ServiceStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }),
    )
}

async fn probe_database(state: &AppState) -> Probe {
    match sqlx::query("SELECT 1").execute(state.db.as_ref()).await {
        Ok(_) => Probe::passed("connected"),
        Err(e) => Probe::failed(format!("query failed: {e}")),
    }
}

async fn probe_lock(state: &AppState) -> Probe {
    let backend = state.lock.backend();
    if state.lock.health_check().await {
        Probe::passed(format!("{backend} backend reachable"))
    } else {
        Probe::failed(format!("{backend} backend unreachable"))
    }
}
