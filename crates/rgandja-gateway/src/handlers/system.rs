//! Liveness and version endpoints.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub engine: String,
    pub timestamp: DateTime<Utc>,
}

pub async fn status(State(app): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        engine: app.cfg().engine.label(),
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub engine: String,
    pub uptime_secs: u64,
    pub timestamp: DateTime<Utc>,
}

pub async fn healthcheck(State(app): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if app.is_draining() { "draining" } else { "online" },
        engine: app.cfg().engine.label(),
        uptime_secs: app.uptime_secs(),
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub engine: String,
    pub versione: String,
    pub protocollo: String,
}

pub async fn versione(State(app): State<AppState>) -> Json<VersionResponse> {
    let engine = &app.cfg().engine;
    Json(VersionResponse {
        engine: engine.name.clone(),
        versione: engine.version.clone(),
        protocollo: engine.protocol.clone(),
    })
}
