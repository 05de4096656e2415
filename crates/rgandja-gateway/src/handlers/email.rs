//! Transactional emails, delivered through the configured `Notifier`.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::error::ApiResult;
use crate::notify::{templates, EmailMessage, Recipient};

#[derive(Debug, Serialize)]
pub struct EmailAck {
    pub status: &'static str,
    pub destinatario: String,
}

async fn send(
    app: &AppState,
    kind: &'static str,
    msg: EmailMessage,
    status: &'static str,
) -> ApiResult<Json<EmailAck>> {
    let destinatario = msg.to.email.clone();
    let notifier = app.notifier();
    match notifier.deliver(msg).await {
        Ok(()) => {
            app.metrics().emails.inc(&[("kind", kind), ("outcome", "sent")]);
            Ok(Json(EmailAck { status, destinatario }))
        }
        Err(e) => {
            app.metrics().emails.inc(&[("kind", kind), ("outcome", "failed")]);
            tracing::warn!(kind, to = %destinatario, error = %e, "email delivery failed");
            Err(e.into())
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEmail {
    pub email: String,
    #[serde(alias = "pdf_link")]
    pub pdf_link: String,
}

pub async fn invia_report(
    State(app): State<AppState>,
    body: Result<Json<ReportEmail>, JsonRejection>,
) -> ApiResult<Json<EmailAck>> {
    let Json(req) = body?;
    let msg = templates::report_ready(Recipient::new(&req.email, None)?, &req.pdf_link);
    send(&app, "report", msg, "email inviata").await
}

#[derive(Debug, Deserialize)]
pub struct OnboardingEmail {
    pub email: String,
}

pub async fn onboarding(
    State(app): State<AppState>,
    body: Result<Json<OnboardingEmail>, JsonRejection>,
) -> ApiResult<Json<EmailAck>> {
    let Json(req) = body?;
    let support = app.cfg().email.support_address.clone();
    let msg = templates::onboarding(Recipient::new(&req.email, None)?, &support);
    send(&app, "onboarding", msg, "email onboarding inviata").await
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseAlertEmail {
    pub email: String,
    #[serde(alias = "giorni_rimanenti")]
    pub giorni_rimanenti: u32,
}

pub async fn alert_licenza(
    State(app): State<AppState>,
    body: Result<Json<LicenseAlertEmail>, JsonRejection>,
) -> ApiResult<Json<EmailAck>> {
    let Json(req) = body?;
    let support = app.cfg().email.support_address.clone();
    let msg = templates::license_expiry(
        Recipient::new(&req.email, None)?,
        req.giorni_rimanenti,
        &support,
    );
    send(&app, "license_alert", msg, "alert licenza inviato").await
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeEmail {
    pub email: String,
    pub name: String,
    pub plan_name: String,
}

pub async fn benvenuto(
    State(app): State<AppState>,
    body: Result<Json<WelcomeEmail>, JsonRejection>,
) -> ApiResult<Json<EmailAck>> {
    let Json(req) = body?;
    let support = app.cfg().email.support_address.clone();
    let msg = templates::plan_activated(
        Recipient::new(&req.email, Some(req.name))?,
        &req.plan_name,
        &support,
    );
    send(&app, "welcome", msg, "email benvenuto inviata").await
}

#[derive(Debug, Deserialize)]
pub struct PromoEmail {
    pub email: String,
    pub name: String,
}

pub async fn promo(
    State(app): State<AppState>,
    body: Result<Json<PromoEmail>, JsonRejection>,
) -> ApiResult<Json<EmailAck>> {
    let Json(req) = body?;
    let msg = templates::promotion(Recipient::new(&req.email, Some(req.name))?);
    send(&app, "promo", msg, "email promozionale inviata").await
}
