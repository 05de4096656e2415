use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;

use rgandja_core::engine::round2;
use rgandja_core::error::{Result, RgandjaError};

use super::normalize_email;

/// One saved analysis outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRecord {
    pub email: String,
    pub risultato: String,
    pub risparmio: f64,
    pub efficienza: f64,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsRecord {
    pub fn new(email: &str, risultato: String, risparmio: f64, efficienza: f64) -> Self {
        Self {
            email: normalize_email(email),
            risultato,
            risparmio,
            efficienza,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub totale_analisi: usize,
    pub media_risparmio: f64,
    pub media_efficienza: f64,
}

impl KpiSummary {
    /// Means rounded to 2 decimals. `None` when there is nothing to average.
    pub fn of(records: &[AnalyticsRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let n = records.len() as f64;
        let savings: f64 = records.iter().map(|r| r.risparmio).sum();
        let efficiency: f64 = records.iter().map(|r| r.efficienza).sum();
        Some(Self {
            totale_analisi: records.len(),
            media_risparmio: round2(savings / n),
            media_efficienza: round2(efficiency / n),
        })
    }
}

pub trait AnalyticsStore: Send + Sync {
    fn append(&self, record: AnalyticsRecord);
    /// Records for one account, oldest first.
    fn history(&self, email: &str) -> Vec<AnalyticsRecord>;

    fn kpi(&self, email: &str) -> Result<KpiSummary> {
        KpiSummary::of(&self.history(email))
            .ok_or_else(|| RgandjaError::NotFound("nessuna analisi trovata".into()))
    }
}

/// Per-account history; past `per_account` records the oldest is evicted.
pub struct InMemoryAnalyticsStore {
    per_account: usize,
    by_email: DashMap<String, VecDeque<AnalyticsRecord>>,
}

impl InMemoryAnalyticsStore {
    pub const DEFAULT_PER_ACCOUNT: usize = 1_000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_PER_ACCOUNT)
    }

    pub fn with_capacity(per_account: usize) -> Self {
        Self {
            per_account: per_account.max(1),
            by_email: DashMap::new(),
        }
    }
}

impl Default for InMemoryAnalyticsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsStore for InMemoryAnalyticsStore {
    fn append(&self, record: AnalyticsRecord) {
        let mut history = self.by_email.entry(record.email.clone()).or_default();
        if history.len() >= self.per_account {
            history.pop_front();
        }
        history.push_back(record);
    }

    fn history(&self, email: &str) -> Vec<AnalyticsRecord> {
        self.by_email
            .get(&normalize_email(email))
            .map(|r| r.value().iter().cloned().collect())
            .unwrap_or_default()
    }
}
