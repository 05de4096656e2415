//! `/calcola`: runs the metrics engine for one request.
//!
//! With `?email=` the outcome is also appended to that account's analytics;
//! the account must exist.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use rgandja_core::engine::Tier;
use rgandja_core::error::RgandjaError;
use rgandja_core::{compute, AnalysisInput, AnalysisResult};

use crate::app_state::AppState;
use crate::error::ApiResult;
use crate::store::AnalyticsRecord;

#[derive(Debug, Deserialize)]
pub struct CalcolaQuery {
    /// When set, the KPIs are saved to this account's analytics.
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcolaResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub pdf_link: String,
}

pub async fn calcola(
    State(app): State<AppState>,
    query: Result<Query<CalcolaQuery>, QueryRejection>,
    body: Result<Json<AnalysisInput>, JsonRejection>,
) -> ApiResult<Json<CalcolaResponse>> {
    let Query(query) = query?;
    let Json(input) = body?;

    if let Some(email) = &query.email {
        if app.users().get(email).is_none() {
            return Err(RgandjaError::NotFound("utente non trovato".into()).into());
        }
    }

    let tier = Tier::parse(&input.algorithm_tier).map_or("other", Tier::as_str);
    let started = Instant::now();
    let result = compute(&input);
    app.metrics()
        .compute_duration
        .observe(&[("tier", tier)], started.elapsed());
    app.metrics()
        .analyses
        .inc(&[("tier", tier), ("status", result.status.as_str())]);

    tracing::debug!(
        tier,
        ien = result.neural_efficiency_index,
        success = result.success_probability,
        status = %result.status,
        "analysis computed"
    );

    if let Some(email) = &query.email {
        app.analytics().append(AnalyticsRecord::new(
            email,
            result.report_text.clone(),
            result.estimated_savings,
            result.neural_efficiency_index,
        ));
        app.metrics().analytics_saved.inc(&[("source", "calcola")]);
    }

    Ok(Json(CalcolaResponse {
        result,
        pdf_link: app.cfg().reports.preview_pdf_url.clone(),
    }))
}
