//! Liveness probe

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`
    pub status: &'static str,
    /// Human-readable, e.g. `1h2m3s`
    pub uptime: String,
    pub transport_connected: bool,
    /// RFC 3339
    pub timestamp: String,
}

/// Request body for reporting transport status
#[derive(Debug, Deserialize)]
pub struct TransportStatus {
    pub connected: bool,
}

/// GET /health - Liveness and transport status (503 while disconnected)
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let connected = state.health.transport_connected();
    let (code, status) = if connected {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthResponse {
            status,
            uptime: format_uptime(state.health.uptime()),
            transport_connected: connected,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }),
    )
}

/// POST /api/transport - Transport adapter reports (dis)connection
pub async fn set_transport_status(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransportStatus>,
) -> StatusCode {
    state.health.set_transport_connected(req.connected);
    StatusCode::NO_CONTENT
}

pub(crate) fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    match (hours, minutes) {
        (0, 0) => format!("{}s", seconds),
        (0, _) => format!("{}m{}s", minutes, seconds),
        _ => format!("{}h{}m{}s", hours, minutes, seconds),
    }
}
