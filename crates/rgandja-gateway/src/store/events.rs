use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    #[serde(rename = "errore")]
    Error,
    #[serde(rename = "evento")]
    Event,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventEntry {
    pub tipo: EventKind,
    pub messaggio: String,
    pub timestamp: DateTime<Utc>,
}

pub trait EventLog: Send + Sync {
    fn record(&self, kind: EventKind, message: String);
    /// Newest first, at most `limit` entries.
    fn recent(&self, limit: usize) -> Vec<EventEntry>;
}

/// Bounded append-only log; the oldest entries are evicted past `capacity`.
pub struct InMemoryEventLog {
    capacity: usize,
    entries: Mutex<VecDeque<EventEntry>>,
}

impl InMemoryEventLog {
    pub const DEFAULT_CAPACITY: usize = 10_000;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }
}

impl Default for InMemoryEventLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl EventLog for InMemoryEventLog {
    fn record(&self, kind: EventKind, message: String) {
        match kind {
            EventKind::Error => tracing::warn!(%message, "client error reported"),
            EventKind::Event => tracing::info!(%message, "client event reported"),
        }
        // Poisoned mutex: drop the entry rather than take the request down.
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(EventEntry {
            tipo: kind,
            messaggio: message,
            timestamp: Utc::now(),
        });
    }

    fn recent(&self, limit: usize) -> Vec<EventEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().rev().take(limit).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}
