//! Per-account analytics: save, history, KPI means.
//!
//! Saving requires a registered account so the store stays keyed by known users.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use rgandja_core::error::RgandjaError;

use super::{Ack, EmailQuery};
use crate::app_state::AppState;
use crate::error::ApiResult;
use crate::notify::looks_like_email;
use crate::store::{AnalyticsRecord, KpiSummary};

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub email: String,
    pub risultato: String,
    pub risparmio: f64,
    pub efficienza: f64,
}

pub async fn salva(
    State(app): State<AppState>,
    body: Result<Json<SaveRequest>, JsonRejection>,
) -> ApiResult<Json<Ack>> {
    let Json(req) = body?;
    if !looks_like_email(req.email.trim()) {
        return Err(RgandjaError::BadRequest("email non valida".into()).into());
    }
    if app.users().get(&req.email).is_none() {
        return Err(RgandjaError::NotFound("utente non trovato".into()).into());
    }
    app.analytics().append(AnalyticsRecord::new(
        &req.email,
        req.risultato,
        req.risparmio,
        req.efficienza,
    ));
    app.metrics().analytics_saved.inc(&[("source", "api")]);
    Ok(Json(Ack {
        status: "analisi salvata",
    }))
}

#[derive(Debug, Serialize)]
pub struct History {
    pub storico: Vec<AnalyticsRecord>,
    pub totale: usize,
}

pub async fn storico(
    State(app): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<History>> {
    let Query(q) = query?;
    let storico = app.analytics().history(&q.email);
    let totale = storico.len();
    Ok(Json(History { storico, totale }))
}

pub async fn kpi(
    State(app): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<KpiSummary>> {
    let Query(q) = query?;
    Ok(Json(app.analytics().kpi(&q.email)?))
}
