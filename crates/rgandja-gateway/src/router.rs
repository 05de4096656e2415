//! Axum router wiring.
//!
//! Analysis, reports, accounts, licenses, analytics, email, logs and system
//! routes, plus `/readyz` and `/metrics`. CORS and per-request trace spans are
//! applied to every route.

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerSection;
use crate::handlers::{accounts, analysis, analytics, email, license, logs, reports, system};
use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cfg().server);

    Router::new()
        .route("/calcola", post(analysis::calcola))
        .route("/genera-pdf", post(reports::genera_pdf))
        .route("/preview-pdf", post(reports::preview_pdf))
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/licenza/valida", get(license::valida))
        .route("/licenza/dettagli", get(license::dettagli))
        .route("/licenza/attiva", post(license::attiva))
        .route("/config/limiti", get(license::limiti))
        .route("/analytics/salva", post(analytics::salva))
        .route("/analytics/storico", get(analytics::storico))
        .route("/analytics/kpi", get(analytics::kpi))
        .route("/email/invia-report", post(email::invia_report))
        .route("/email/onboarding", post(email::onboarding))
        .route("/email/alert-licenza", post(email::alert_licenza))
        .route("/email/benvenuto", post(email::benvenuto))
        .route("/email/promo", post(email::promo))
        .route("/log/errori", post(logs::errori))
        .route("/log/eventi", post(logs::eventi))
        .route("/log/recenti", get(logs::recenti))
        .route("/status", get(system::status))
        .route("/healthcheck", get(system::healthcheck))
        .route("/config/versione", get(system::versione))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentials are never allowed together with a wildcard origin.
fn cors_layer(server: &ServerSection) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if server.allows_any_origin() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid cors origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(origins))
}
