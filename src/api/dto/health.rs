//! `/health` response body.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: Probe,
    /// Backend behind the per-event generation lock.
    pub lock: Probe,
}

/// Outcome of probing one dependency.
#[derive(Debug, Serialize)]
pub struct Probe {
    pub status: ProbeStatus,
    pub message: String,
}

impl Probe {
    pub fn passed(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Ok,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Error,
            message: message.into(),
        }
    }
}

impl HealthChecks {
    pub fn overall(&self) -> ServiceStatus {
        if self.database.status == ProbeStatus::Ok && self.lock.status == ProbeStatus::Ok {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        }
    }
}
