//! Request and response payloads for the compute-metrics operation.
//!
//! Field names on the wire are camelCase. The legacy Italian field names of
//! the first public API are still accepted on input.

use serde::{Deserialize, Serialize};

/// Company operational metrics submitted for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    /// `junior`, `pmi` or `enterprise` (case-insensitive). Anything else
    /// falls back to the default coefficient.
    #[serde(alias = "algoritmo")]
    pub algorithm_tier: String,
    #[serde(alias = "budget")]
    pub annual_budget: f64,
    #[serde(alias = "resilienza")]
    pub is_resilient: bool,
    #[serde(alias = "ore_assenze")]
    pub weekly_absence_hours: f64,
    #[serde(alias = "standby_watt")]
    pub standby_watts: f64,
    #[serde(alias = "metri_quadri")]
    pub floor_area_sqm: f64,
    /// Divisor for the absence ratio. Values below 1 count as 1.
    #[serde(alias = "num_dipendenti")]
    pub employee_count: i64,
}

/// Threshold classification of the success probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "CRITICO")]
    Critical,
    #[serde(rename = "STABILE")]
    Stable,
    #[serde(rename = "OTTIMALE")]
    Optimal,
}

impl Status {
    /// Wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Critical => "CRITICO",
            Status::Stable => "STABILE",
            Status::Optimal => "OTTIMALE",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived efficiency report. Carries no identity; built per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// IEN, floored at 5.
    pub neural_efficiency_index: f64,
    /// Percentage in [0, 100], rounded to 2 decimals.
    pub success_probability: f64,
    /// Currency units, rounded to 2 decimals.
    pub estimated_savings: f64,
    pub status: Status,
    pub report_text: String,
    pub is_premium_locked: bool,
}
