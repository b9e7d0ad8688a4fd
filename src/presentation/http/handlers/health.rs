//! Health Check Handlers
//!
//! - `GET /health`: process is up, no dependencies touched
//! - `GET /health/live`: liveness probe
//! - `GET /health/ready`: readiness probe, pings the branch store and
//!   answers 503 when it is unreachable

use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::startup::AppState;

/// Store round trips slower than this report `degraded`.
const SLOW_STORAGE: Duration = Duration::from_millis(100);

struct StartedAt {
    instant: Instant,
    wall_clock: DateTime<Utc>,
}

static STARTED_AT: Lazy<StartedAt> = Lazy::new(|| StartedAt {
    instant: Instant::now(),
    wall_clock: Utc::now(),
});

/// Pin the uptime origin to process startup instead of the first probe.
pub fn init_server_start() {
    Lazy::force(&STARTED_AT);
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
}

/// Result of pinging the configured branch store.
#[derive(Debug, Serialize)]
pub struct StorageHealth {
    pub backend: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StorageHealth {
    fn reachable(backend: String, latency: Duration) -> Self {
        let status = if latency < SLOW_STORAGE {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };
        Self {
            backend,
            status,
            latency_ms: Some(latency.as_millis() as u64),
            message: None,
        }
    }

    fn unreachable(backend: String, error: impl std::fmt::Display) -> Self {
        Self {
            backend,
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some(format!("Storage check failed: {}", error)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub storage: StorageHealth,
}

pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "healthy",
        version: Some(env!("CARGO_PKG_VERSION")),
    })
}

pub async fn liveness() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive",
        version: None,
    })
}

pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let backend = state.settings.storage.backend.to_string();
    let start = Instant::now();
    let storage = match state.branch_service.check_storage().await {
        Ok(()) => StorageHealth::reachable(backend, start.elapsed()),
        Err(e) => StorageHealth::unreachable(backend, e),
    };

    let code = if storage.status == HealthStatus::Unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    let response = ReadinessResponse {
        status: storage.status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: STARTED_AT.instant.elapsed().as_secs(),
        started_at: STARTED_AT.wall_clock.to_rfc3339(),
        storage,
    };

    (code, Json(response))
}
