//! Keyed in-memory record stores for accounts, analytics and the event log.
//!
//! Each store sits behind a trait so a durable backend can replace it without
//! touching handlers. Writes are per key; there is no whole-document rewrite.

pub mod analytics;
pub mod events;
pub mod users;

pub use analytics::{AnalyticsRecord, AnalyticsStore, InMemoryAnalyticsStore, KpiSummary};
pub use events::{EventEntry, EventKind, EventLog, InMemoryEventLog};
pub use users::{InMemoryUserStore, UserRecord, UserStore};

/// Emails are keyed case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
