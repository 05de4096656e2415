//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use rgandja_core::error::{Result, RgandjaError};

pub use schema::{
    EmailConfig, EmailProvider, EngineInfo, GatewayConfig, LicenseSection, ReportsSection,
    ServerSection,
};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "RGANDJA_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "rgandja.yaml";

pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RgandjaError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| RgandjaError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
