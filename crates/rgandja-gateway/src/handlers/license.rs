//! License status, activation and plan limits.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rgandja_core::error::RgandjaError;

use super::EmailQuery;
use crate::app_state::AppState;
use crate::error::ApiResult;
use crate::policy::{LicensePlan, PlanLimits};

#[derive(Debug, Serialize)]
pub struct LicenseStatus {
    pub licenza: LicensePlan,
    pub scadenza: NaiveDate,
    pub premium: bool,
}

#[derive(Debug, Serialize)]
pub struct LicenseDetails {
    #[serde(flatten)]
    pub status: LicenseStatus,
    pub limiti: PlanLimits,
}

fn lookup(app: &AppState, email: &str) -> ApiResult<LicenseStatus> {
    let user = app
        .users()
        .get(email)
        .ok_or_else(|| RgandjaError::NotFound("utente non trovato".into()))?;
    Ok(LicenseStatus {
        licenza: user.plan,
        scadenza: user.expires_on,
        premium: user.plan.is_premium(),
    })
}

pub async fn valida(
    State(app): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<LicenseStatus>> {
    let Query(q) = query?;
    Ok(Json(lookup(&app, &q.email)?))
}

pub async fn dettagli(
    State(app): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<LicenseDetails>> {
    let Query(q) = query?;
    let status = lookup(&app, &q.email)?;
    let limiti = status.licenza.limits();
    Ok(Json(LicenseDetails { status, limiti }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateRequest {
    pub email: String,
    #[serde(alias = "nuova_licenza")]
    pub nuova_licenza: String,
}

#[derive(Debug, Serialize)]
pub struct ActivateResponse {
    pub status: &'static str,
    pub licenza: LicensePlan,
    pub scadenza: NaiveDate,
}

pub async fn attiva(
    State(app): State<AppState>,
    body: Result<Json<ActivateRequest>, JsonRejection>,
) -> ApiResult<Json<ActivateResponse>> {
    let Json(req) = body?;
    let plan = LicensePlan::parse(&req.nuova_licenza)?;
    let user = app
        .users()
        .set_plan(&req.email, plan, app.cfg().license.upgrade_expiry)?;

    app.metrics().license_changes.inc(&[("plan", plan.as_str())]);
    tracing::info!(email = %user.email, %plan, expires = %user.expires_on, "license activated");
    Ok(Json(ActivateResponse {
        status: "licenza aggiornata",
        licenza: user.plan,
        scadenza: user.expires_on,
    }))
}

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub piano: String,
}

pub async fn limiti(
    query: Result<Query<PlanQuery>, QueryRejection>,
) -> ApiResult<Json<PlanLimits>> {
    let Query(q) = query?;
    Ok(Json(LicensePlan::parse(&q.piano)?.limits()))
}
