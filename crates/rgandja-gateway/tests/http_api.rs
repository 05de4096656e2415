//! End-to-end tests through the full router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use rgandja_core::error::{Result, RgandjaError};
use rgandja_gateway::app_state::AppState;
use rgandja_gateway::config::GatewayConfig;
use rgandja_gateway::notify::{EmailMessage, Notifier};
use rgandja_gateway::router::build_router;
use rgandja_gateway::store::{InMemoryAnalyticsStore, InMemoryEventLog, InMemoryUserStore};

// ───────────────────────────────────────────────────────────────
// Test infrastructure
// ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<EmailMessage>>,
    fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn provider(&self) -> &'static str {
        "recording"
    }

    async fn deliver(&self, msg: EmailMessage) -> Result<()> {
        if self.fail {
            return Err(RgandjaError::Upstream("provider down".into()));
        }
        self.sent.lock().unwrap().push(msg);
        Ok(())
    }
}

fn app_with(notifier: Arc<RecordingNotifier>) -> (Router, AppState) {
    let state = AppState::with_parts(
        GatewayConfig::default(),
        Arc::new(InMemoryUserStore::new()),
        Arc::new(InMemoryAnalyticsStore::new()),
        Arc::new(InMemoryEventLog::default()),
        notifier,
    );
    (build_router(state.clone()), state)
}

fn app() -> Router {
    app_with(Arc::new(RecordingNotifier::default())).0
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::POST, uri, Some(body)).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Method::GET, uri, None).await
}

fn pmi_input() -> Value {
    json!({
        "algorithmTier": "pmi",
        "annualBudget": 100000,
        "isResilient": true,
        "weeklyAbsenceHours": 20,
        "standbyWatts": 500,
        "floorAreaSqm": 200,
        "employeeCount": 10
    })
}

async fn register(app: &Router, email: &str) {
    let (status, _) = post(app, "/register", json!({"email": email, "password": "pw"})).await;
    assert_eq!(status, StatusCode::CREATED);
}

// ───────────────────────────────────────────────────────────────
// Analysis
// ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn calcola_returns_result_and_preview_link() {
    let app = app();
    let (status, body) = post(&app, "/calcola", pmi_input()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["neuralEfficiencyIndex"], 85.0);
    assert_eq!(body["successProbability"], 99.48);
    assert_eq!(body["estimatedSavings"], 72.8);
    assert_eq!(body["status"], "OTTIMALE");
    assert_eq!(body["isPremiumLocked"], true);
    assert!(body["reportText"].as_str().unwrap().contains("PMI"));
    assert!(body["pdfLink"].as_str().unwrap().ends_with("report-preview-sample.pdf"));
}

#[tokio::test]
async fn calcola_rejects_malformed_body() {
    let app = app();
    let (status, body) = post(&app, "/calcola", json!({"algorithmTier": "pmi"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn calcola_with_email_saves_analytics() {
    let app = app();
    register(&app, "ceo@azienda.it").await;

    let (status, _) = post(&app, "/calcola?email=ceo@azienda.it", pmi_input()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/analytics/kpi?email=ceo@azienda.it").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totaleAnalisi"], 1);
    assert_eq!(body["mediaRisparmio"], 72.8);
    assert_eq!(body["mediaEfficienza"], 85.0);
}

#[tokio::test]
async fn calcola_with_unknown_email_is_not_found() {
    let app = app();
    let (status, body) = post(&app, "/calcola?email=ghost@azienda.it", pmi_input()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn calcola_counts_analyses() {
    let (app, state) = app_with(Arc::new(RecordingNotifier::default()));
    post(&app, "/calcola", pmi_input()).await;
    let mut unknown = pmi_input();
    unknown["algorithmTier"] = json!("Foo");
    post(&app, "/calcola", unknown).await;

    let m = state.metrics();
    assert_eq!(m.analyses.get(&[("tier", "pmi"), ("status", "OTTIMALE")]), 1);
    assert_eq!(m.analyses.get(&[("tier", "other"), ("status", "OTTIMALE")]), 1);
}

// ───────────────────────────────────────────────────────────────
// Accounts & licenses
// ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_login_and_license_flow() {
    let app = app();
    register(&app, "mario@rossi.it").await;

    let (status, body) = post(&app, "/register", json!({"email": "mario@rossi.it", "password": "x"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    let (status, body) = post(&app, "/login", json!({"email": "mario@rossi.it", "password": "pw"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["licenza"], "Bronzo");

    let (status, _) = post(&app, "/login", json!({"email": "mario@rossi.it", "password": "nope"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = post(&app, "/login", json!({"email": "ghost@rossi.it", "password": "pw"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = get(&app, "/licenza/valida?email=mario@rossi.it").await;
    assert_eq!(body, json!({"licenza": "Bronzo", "scadenza": "2026-06-30", "premium": false}));

    let (status, body) = post(
        &app,
        "/licenza/attiva",
        json!({"email": "mario@rossi.it", "nuovaLicenza": "Argento"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["licenza"], "Argento");
    assert_eq!(body["scadenza"], "2026-12-31");

    let (_, body) = get(&app, "/licenza/dettagli?email=mario@rossi.it").await;
    assert_eq!(body["premium"], true);
    assert_eq!(body["limiti"]["analisiMensili"], 50);
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let app = app();
    let (status, _) = post(&app, "/register", json!({"email": "not-an-email", "password": "pw"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = post(&app, "/register", json!({"email": "a@b.it", "password": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn license_errors() {
    let app = app();
    register(&app, "a@b.it").await;

    let (status, _) = post(&app, "/licenza/attiva", json!({"email": "a@b.it", "nuovaLicenza": "Platino"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = post(&app, "/licenza/attiva", json!({"email": "x@b.it", "nuovaLicenza": "Oro"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/licenza/valida?email=x@b.it").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/licenza/valida").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn plan_limits_table() {
    let app = app();
    let (status, body) = get(&app, "/config/limiti?piano=Oro").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"analisiMensili": "Illimitate", "pdf": true, "supporto": "Premium 24/7"}));

    let (status, body) = get(&app, "/config/limiti?piano=Bronzo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pdf"], false);

    let (status, _) = get(&app, "/config/limiti?piano=Rame").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ───────────────────────────────────────────────────────────────
// Reports
// ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn premium_pdf_requires_pdf_plan() {
    let app = app();
    register(&app, "a@b.it").await;
    let req = json!({
        "algorithmTier": "pmi",
        "annualBudget": 1000,
        "reportText": "...",
        "premium": true,
        "email": "a@b.it"
    });

    let (status, body) = post(&app, "/genera-pdf", req.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "NOT_ALLOWED");

    post(&app, "/licenza/attiva", json!({"email": "a@b.it", "nuovaLicenza": "Oro"})).await;
    let (status, body) = post(&app, "/genera-pdf", req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["premium"], true);
    assert!(body["pdfLink"].as_str().unwrap().ends_with("report-premium-sample.pdf"));
}

#[tokio::test]
async fn premium_pdf_without_account_is_refused() {
    let app = app();
    let req = json!({"algorithmTier": "pmi", "annualBudget": 1000, "reportText": "..."});
    let (status, _) = post(&app, "/genera-pdf", req.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = post(&app, "/preview-pdf", req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["premium"], false);
}

// ───────────────────────────────────────────────────────────────
// Analytics
// ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn analytics_history_and_kpi() {
    let app = app();
    register(&app, "a@b.it").await;
    for (r, e) in [(100.0, 80.0), (200.0, 90.0)] {
        let (status, body) = post(
            &app,
            "/analytics/salva",
            json!({"email": "a@b.it", "risultato": "ok", "risparmio": r, "efficienza": e}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "analisi salvata");
    }

    let (_, body) = get(&app, "/analytics/storico?email=a@b.it").await;
    assert_eq!(body["totale"], 2);
    assert_eq!(body["storico"][0]["risparmio"], 100.0);
    assert!(body["storico"][1]["timestamp"].as_str().unwrap().ends_with('Z'));

    let (_, body) = get(&app, "/analytics/kpi?email=a@b.it").await;
    assert_eq!(body["mediaRisparmio"], 150.0);
    assert_eq!(body["mediaEfficienza"], 85.0);

    let (status, _) = get(&app, "/analytics/kpi?email=nobody@b.it").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = get(&app, "/analytics/storico?email=nobody@b.it").await;
    assert_eq!(body["totale"], 0);
}

#[tokio::test]
async fn analytics_save_needs_a_registered_account() {
    let (app, state) = app_with(Arc::new(RecordingNotifier::default()));
    let (status, body) = post(
        &app,
        "/analytics/salva",
        json!({"email": "ghost@b.it", "risultato": "ok", "risparmio": 1.0, "efficienza": 1.0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert!(state.analytics().history("ghost@b.it").is_empty());
    assert_eq!(state.metrics().analytics_saved.get(&[("source", "api")]), 0);
}

// ───────────────────────────────────────────────────────────────
// Email
// ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn emails_are_delivered_through_notifier() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (app, _) = app_with(Arc::clone(&notifier));

    let (status, body) = post(
        &app,
        "/email/invia-report",
        json!({"email": "a@b.it", "pdfLink": "https://x.test/r.pdf"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "email inviata", "destinatario": "a@b.it"}));

    post(&app, "/email/onboarding", json!({"email": "a@b.it"})).await;
    post(&app, "/email/alert-licenza", json!({"email": "a@b.it", "giorniRimanenti": 5})).await;
    post(&app, "/email/benvenuto", json!({"email": "a@b.it", "name": "Ada", "planName": "Oro"})).await;
    post(&app, "/email/promo", json!({"email": "a@b.it", "name": "Ada"})).await;

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 5);
    assert!(sent[0].html.contains("https://x.test/r.pdf"));
    assert!(sent[2].html.contains("tra 5 giorni"));
    assert!(sent[3].html.contains("Ada"));
}

#[tokio::test]
async fn email_to_bad_address_is_rejected() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (app, _) = app_with(Arc::clone(&notifier));
    let (status, _) = post(&app, "/email/onboarding", json!({"email": "nope"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delivery_failure_is_upstream_error() {
    let notifier = Arc::new(RecordingNotifier {
        fail: true,
        ..Default::default()
    });
    let (app, state) = app_with(notifier);
    let (status, body) = post(&app, "/email/onboarding", json!({"email": "a@b.it"})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "UPSTREAM");
    assert_eq!(
        state.metrics().emails.get(&[("kind", "onboarding"), ("outcome", "failed")]),
        1
    );
}

// ───────────────────────────────────────────────────────────────
// Logs & system
// ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn event_log_records_and_lists() {
    let app = app();
    let (_, body) = post(&app, "/log/errori", json!({"messaggio": "boom"})).await;
    assert_eq!(body["status"], "errore registrato");
    let (_, body) = post(&app, "/log/eventi", json!({"messaggio": "login"})).await;
    assert_eq!(body["status"], "evento registrato");

    let (_, body) = get(&app, "/log/recenti?limit=10").await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["tipo"], "evento");
    assert_eq!(entries[1]["messaggio"], "boom");
}

#[tokio::test]
async fn system_endpoints() {
    let (app, state) = app_with(Arc::new(RecordingNotifier::default()));

    let (status, body) = get(&app, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["engine"], "RGandja Neural Core v1.0.0");

    let (_, body) = get(&app, "/config/versione").await;
    assert_eq!(body, json!({"engine": "RGandja Neural Core", "versione": "1.0.0", "protocollo": "RGD-Alpha"}));

    let (_, body) = get(&app, "/healthcheck").await;
    assert!(body["uptimeSecs"].is_u64());

    let (status, body) = get(&app, "/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ready".into()));

    post(&app, "/calcola", pmi_input()).await;
    let (status, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let text = body.as_str().unwrap();
    assert!(text.contains("rgandja_analyses_total{status=\"OTTIMALE\",tier=\"pmi\"} 1"));
    assert!(text.contains("rgandja_uptime_seconds"));

    state.set_draining();
    let (status, _) = get(&app, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let app = app();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/calcola")
        .header(header::ORIGIN, "https://rgandja.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
