//! License policy: plan table and feature gating.
//!
//! The engine only suggests a premium lock; whether a feature is actually
//! granted is decided here from the caller's license plan.

pub mod plans;

pub use plans::{LicensePlan, MonthlyAnalyses, PlanLimits};
