use std::net::SocketAddr;

use chrono::NaiveDate;
use serde::Deserialize;
use rgandja_core::error::{Result, RgandjaError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub engine: EngineInfo,

    #[serde(default)]
    pub license: LicenseSection,

    #[serde(default)]
    pub reports: ReportsSection,

    #[serde(default)]
    pub email: EmailConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            engine: EngineInfo::default(),
            license: LicenseSection::default(),
            reports: ReportsSection::default(),
            email: EmailConfig::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RgandjaError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.email.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.cors_origins.is_empty() {
            return Err(RgandjaError::BadRequest(
                "server.cors_origins must not be empty (use \"*\" for any)".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            RgandjaError::BadRequest(format!(
                "server.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

/// Identity reported by `/status`, `/healthcheck` and `/config/versione`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineInfo {
    #[serde(default = "default_engine_name")]
    pub name: String,
    #[serde(default = "default_engine_version")]
    pub version: String,
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

impl Default for EngineInfo {
    fn default() -> Self {
        Self {
            name: default_engine_name(),
            version: default_engine_version(),
            protocol: default_protocol(),
        }
    }
}

impl EngineInfo {
    pub fn label(&self) -> String {
        format!("{} v{}", self.name, self.version)
    }
}

fn default_engine_name() -> String {
    "RGandja Neural Core".into()
}
fn default_engine_version() -> String {
    "1.0.0".into()
}
fn default_protocol() -> String {
    "RGD-Alpha".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseSection {
    /// Expiry assigned to new accounts.
    #[serde(default = "default_trial_expiry")]
    pub trial_expiry: NaiveDate,
    /// Expiry assigned when a plan is activated.
    #[serde(default = "default_upgrade_expiry")]
    pub upgrade_expiry: NaiveDate,
}

impl Default for LicenseSection {
    fn default() -> Self {
        Self {
            trial_expiry: default_trial_expiry(),
            upgrade_expiry: default_upgrade_expiry(),
        }
    }
}

fn default_trial_expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 30).unwrap_or_default()
}
fn default_upgrade_expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or_default()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportsSection {
    #[serde(default = "default_preview_pdf_url")]
    pub preview_pdf_url: String,
    #[serde(default = "default_premium_pdf_url")]
    pub premium_pdf_url: String,
}

impl Default for ReportsSection {
    fn default() -> Self {
        Self {
            preview_pdf_url: default_preview_pdf_url(),
            premium_pdf_url: default_premium_pdf_url(),
        }
    }
}

fn default_preview_pdf_url() -> String {
    "https://rgandja.com/static/report-preview-sample.pdf".into()
}
fn default_premium_pdf_url() -> String {
    "https://rgandja.com/static/report-premium-sample.pdf".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmailProvider {
    /// Messages are written to the log only.
    #[default]
    Log,
    Brevo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    #[serde(default)]
    pub provider: EmailProvider,
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    #[serde(default = "default_sender_email")]
    pub sender_email: String,
    #[serde(default = "default_support_address")]
    pub support_address: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Name of the env var holding the provider API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            sender_name: default_sender_name(),
            sender_email: default_sender_email(),
            support_address: default_support_address(),
            api_base_url: default_api_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl EmailConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.sender_email.contains('@') {
            return Err(RgandjaError::BadRequest(
                "email.sender_email must be an email address".into(),
            ));
        }
        if !self.support_address.contains('@') {
            return Err(RgandjaError::BadRequest(
                "email.support_address must be an email address".into(),
            ));
        }
        if self.provider == EmailProvider::Brevo && self.api_key_env.trim().is_empty() {
            return Err(RgandjaError::BadRequest(
                "email.api_key_env is required for the brevo provider".into(),
            ));
        }
        Ok(())
    }
}

fn default_sender_name() -> String {
    "RGandja".into()
}
fn default_sender_email() -> String {
    "info@rgandja.com".into()
}
fn default_support_address() -> String {
    "support@rgandja.com".into()
}
fn default_api_base_url() -> String {
    "https://api.brevo.com".into()
}
fn default_api_key_env() -> String {
    "BREVO_API_KEY".into()
}
