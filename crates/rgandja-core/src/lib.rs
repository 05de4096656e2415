//! RGandja core: the RGD-Alpha metrics engine, its request/response model, and
//! the error surface shared with the gateway.
//!
//! This crate carries no transport or runtime dependencies. The engine is a
//! pure function of its input, so it can be evaluated from any number of
//! request handlers concurrently without coordination.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Degenerate inputs
//! (zero headcount, unknown tier) are absorbed by documented fallbacks rather
//! than surfaced as errors.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod engine;
pub mod error;
pub mod model;

pub use engine::compute;
pub use error::{Result, RgandjaError};
pub use model::{AnalysisInput, AnalysisResult, Status};
