//! Outbound transactional email.
//!
//! Handlers build an [`EmailMessage`] from a template and hand it to the
//! configured [`Notifier`]. Delivery failures surface as `Upstream` errors.

pub mod brevo;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;

use rgandja_core::error::{Result, RgandjaError};

use crate::config::{EmailConfig, EmailProvider};

pub use brevo::BrevoNotifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub email: String,
    pub name: Option<String>,
}

impl Recipient {
    pub fn new(email: &str, name: Option<String>) -> Result<Self> {
        let email = email.trim();
        if !looks_like_email(email) {
            return Err(RgandjaError::BadRequest(format!("indirizzo email non valido: {email}")));
        }
        Ok(Self {
            email: email.to_string(),
            name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: Recipient,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn provider(&self) -> &'static str;
    async fn deliver(&self, msg: EmailMessage) -> Result<()>;
}

/// Simulated delivery: the message goes to the log only.
#[derive(Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn provider(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, msg: EmailMessage) -> Result<()> {
        tracing::info!(to = %msg.to.email, subject = %msg.subject, "email (simulated)");
        tracing::debug!(body = %msg.html);
        Ok(())
    }
}

pub fn from_config(cfg: &EmailConfig) -> Result<Arc<dyn Notifier>> {
    match cfg.provider {
        EmailProvider::Log => Ok(Arc::new(LogNotifier)),
        EmailProvider::Brevo => Ok(Arc::new(BrevoNotifier::from_config(cfg)?)),
    }
}

/// Cheap shape check; the provider does the real validation.
pub fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !s.contains(' '),
        None => false,
    }
}
