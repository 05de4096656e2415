//! `/register` and `/login`.

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use rgandja_core::error::RgandjaError;

use crate::app_state::AppState;
use crate::error::ApiResult;
use crate::notify::looks_like_email;
use crate::policy::LicensePlan;
use crate::store::UserRecord;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub status: &'static str,
    pub licenza: LicensePlan,
}

pub async fn register(
    State(app): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AccountResponse>)> {
    let Json(creds) = body?;
    if !looks_like_email(creds.email.trim()) {
        return Err(RgandjaError::BadRequest("email non valida".into()).into());
    }
    if creds.password.is_empty() {
        return Err(RgandjaError::BadRequest("password obbligatoria".into()).into());
    }

    let plan = LicensePlan::Bronze;
    let user = UserRecord::new(
        &creds.email,
        &creds.password,
        plan,
        app.cfg().license.trial_expiry,
    );
    let email = user.email.clone();
    app.users().insert(user)?;
    app.metrics().registrations.inc(&[("plan", plan.as_str())]);
    tracing::info!(%email, %plan, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            status: "registrazione completata",
            licenza: plan,
        }),
    ))
}

pub async fn login(
    State(app): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<AccountResponse>> {
    let Json(creds) = body?;
    // Unknown account and wrong password are indistinguishable to the caller.
    let user = app
        .users()
        .get(&creds.email)
        .filter(|u| u.verify_password(&creds.password));

    let Some(user) = user else {
        app.metrics().logins.inc(&[("outcome", "rejected")]);
        tracing::info!(email = %creds.email, "login rejected");
        return Err(RgandjaError::AuthFailed.into());
    };

    app.metrics().logins.inc(&[("outcome", "ok")]);
    Ok(Json(AccountResponse {
        status: "accesso riuscito",
        licenza: user.plan,
    }))
}
