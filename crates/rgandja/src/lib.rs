//! Top-level facade crate for RGandja.
//!
//! Re-exports the metrics engine and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use rgandja_core::*;
}

pub mod gateway {
    pub use rgandja_gateway::*;
}
