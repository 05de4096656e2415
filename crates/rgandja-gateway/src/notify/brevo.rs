//! Brevo transactional email adapter.
//!
//! POSTs to `{api_base_url}/v3/smtp/email` with the key from the env var
//! named in config. The key is held as a `SecretString`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use rgandja_core::error::{Result, RgandjaError};

use super::{EmailMessage, Notifier};
use crate::config::EmailConfig;

pub struct BrevoNotifier {
    api_key: SecretString,
    endpoint: String,
    sender_name: String,
    sender_email: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct Contact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

impl BrevoNotifier {
    pub fn new(api_key: impl Into<String>, cfg: &EmailConfig) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            endpoint: format!("{}/v3/smtp/email", cfg.api_base_url.trim_end_matches('/')),
            sender_name: cfg.sender_name.clone(),
            sender_email: cfg.sender_email.clone(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn from_config(cfg: &EmailConfig) -> Result<Self> {
        let key = std::env::var(&cfg.api_key_env).map_err(|_| {
            RgandjaError::Internal(format!("{} is not set", cfg.api_key_env))
        })?;
        Ok(Self::new(key, cfg))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&'a self, msg: &'a EmailMessage) -> SendRequest<'a> {
        SendRequest {
            sender: Contact {
                email: &self.sender_email,
                name: Some(&self.sender_name),
            },
            to: vec![Contact {
                email: &msg.to.email,
                name: msg.to.name.as_deref(),
            }],
            subject: &msg.subject,
            html_content: &msg.html,
        }
    }
}

#[async_trait]
impl Notifier for BrevoNotifier {
    fn provider(&self) -> &'static str {
        "brevo"
    }

    async fn deliver(&self, msg: EmailMessage) -> Result<()> {
        let resp = self
            .http_client
            .post(&self.endpoint)
            .header("api-key", self.api_key.expose_secret())
            .json(&self.request_body(&msg))
            .send()
            .await
            .map_err(|e| RgandjaError::Upstream(format!("brevo request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, to = %msg.to.email, "brevo rejected email");
            return Err(RgandjaError::Upstream(format!("brevo returned {status}: {body}")));
        }
        tracing::info!(to = %msg.to.email, subject = %msg.subject, "email sent via brevo");
        Ok(())
    }
}
