//! RGandja gateway library entry.
//!
//! Wires config, record stores, license policy, notifications and metrics
//! around the core engine into an axum HTTP service. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod notify;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod store;
