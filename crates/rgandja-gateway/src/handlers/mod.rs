//! HTTP handlers, grouped by collaborator.
//!
//! Bodies are extracted as `Result<Json<T>, JsonRejection>` so malformed
//! input is reported with the shared JSON error shape.

pub mod accounts;
pub mod analysis;
pub mod analytics;
pub mod email;
pub mod license;
pub mod logs;
pub mod reports;
pub mod system;

use serde::{Deserialize, Serialize};

/// `?email=` query used by several lookups.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Generic acknowledgement, `{"status": "..."}`.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub status: &'static str,
}
