//! Client-reported errors and events.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;

use super::Ack;
use crate::app_state::AppState;
use crate::error::ApiResult;
use crate::store::{EventEntry, EventKind};

const DEFAULT_RECENT: usize = 50;
const MAX_RECENT: usize = 500;

#[derive(Debug, Deserialize)]
pub struct LogMessage {
    pub messaggio: String,
}

pub async fn errori(
    State(app): State<AppState>,
    body: Result<Json<LogMessage>, JsonRejection>,
) -> ApiResult<Json<Ack>> {
    let Json(req) = body?;
    app.events().record(EventKind::Error, req.messaggio);
    Ok(Json(Ack {
        status: "errore registrato",
    }))
}

pub async fn eventi(
    State(app): State<AppState>,
    body: Result<Json<LogMessage>, JsonRejection>,
) -> ApiResult<Json<Ack>> {
    let Json(req) = body?;
    app.events().record(EventKind::Event, req.messaggio);
    Ok(Json(Ack {
        status: "evento registrato",
    }))
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

pub async fn recenti(
    State(app): State<AppState>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EventEntry>>> {
    let Query(q) = query?;
    let limit = q.limit.unwrap_or(DEFAULT_RECENT).min(MAX_RECENT);
    Ok(Json(app.events().recent(limit)))
}
