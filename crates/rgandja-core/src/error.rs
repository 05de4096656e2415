//! Shared error type across RGandja crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Credentials rejected.
    AuthFailed,
    /// Referenced record does not exist.
    NotFound,
    /// Record already exists.
    Conflict,
    /// Not allowed by the caller's license plan.
    NotAllowed,
    /// A third-party collaborator (mail API) failed.
    Upstream,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::NotAllowed => "NOT_ALLOWED",
            ClientCode::Upstream => "UPSTREAM",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RgandjaError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum RgandjaError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not allowed: {0}")]
    NotAllowed(String),
    #[error("upstream failure: {0}")]
    Upstream(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl RgandjaError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            RgandjaError::BadRequest(_) => ClientCode::BadRequest,
            RgandjaError::AuthFailed => ClientCode::AuthFailed,
            RgandjaError::NotFound(_) => ClientCode::NotFound,
            RgandjaError::Conflict(_) => ClientCode::Conflict,
            RgandjaError::NotAllowed(_) => ClientCode::NotAllowed,
            RgandjaError::Upstream(_) => ClientCode::Upstream,
            RgandjaError::Internal(_) => ClientCode::Internal,
        }
    }
}
