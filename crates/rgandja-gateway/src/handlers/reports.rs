//! PDF link issuance. Rendering itself is external; we hand out links.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use rgandja_core::error::RgandjaError;

use crate::app_state::AppState;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfRequest {
    #[serde(alias = "algoritmo")]
    pub algorithm_tier: String,
    #[serde(alias = "budget")]
    pub annual_budget: f64,
    #[serde(alias = "risultato_testuale")]
    pub report_text: String,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfResponse {
    pub status: &'static str,
    pub premium: bool,
    pub pdf_link: String,
}

/// Premium export: the account's plan must include PDF.
pub async fn genera_pdf(
    State(app): State<AppState>,
    body: Result<Json<PdfRequest>, JsonRejection>,
) -> ApiResult<Json<PdfResponse>> {
    let Json(req) = body?;
    let email = req
        .email
        .as_deref()
        .ok_or_else(|| RgandjaError::NotAllowed("il report premium richiede un account".into()))?;
    let user = app
        .users()
        .get(email)
        .ok_or_else(|| RgandjaError::NotFound("utente non trovato".into()))?;
    user.plan.require_pdf()?;

    tracing::info!(
        email = %user.email,
        tier = %req.algorithm_tier,
        report_len = req.report_text.len(),
        "premium pdf issued"
    );
    Ok(Json(PdfResponse {
        status: "ok",
        premium: true,
        pdf_link: app.cfg().reports.premium_pdf_url.clone(),
    }))
}

pub async fn preview_pdf(
    State(app): State<AppState>,
    body: Result<Json<PdfRequest>, JsonRejection>,
) -> ApiResult<Json<PdfResponse>> {
    let Json(req) = body?;
    tracing::debug!(tier = %req.algorithm_tier, budget = req.annual_budget, "preview pdf issued");
    Ok(Json(PdfResponse {
        status: "ok",
        premium: false,
        pdf_link: app.cfg().reports.preview_pdf_url.clone(),
    }))
}
