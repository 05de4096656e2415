//! Shared application state for the RGandja gateway.

use std::sync::Arc;
use std::time::Instant;

use rgandja_core::error::Result;

use crate::config::GatewayConfig;
use crate::notify::{self, Notifier};
use crate::obs::ServiceMetrics;
use crate::store::{
    AnalyticsStore, EventLog, InMemoryAnalyticsStore, InMemoryEventLog, InMemoryUserStore,
    UserStore,
};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    users: Arc<dyn UserStore>,
    analytics: Arc<dyn AnalyticsStore>,
    events: Arc<dyn EventLog>,
    notifier: Arc<dyn Notifier>,
    metrics: ServiceMetrics,
    started_at: Instant,
}

impl AppState {
    /// Build state with in-memory stores and the notifier named in config.
    /// Returns Result so main can report a misconfigured provider instead of panicking.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let notifier = notify::from_config(&cfg.email)?;
        tracing::info!(provider = notifier.provider(), "email notifier ready");
        Ok(Self::with_parts(
            cfg,
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryAnalyticsStore::new()),
            Arc::new(InMemoryEventLog::default()),
            notifier,
        ))
    }

    pub fn with_parts(
        cfg: GatewayConfig,
        users: Arc<dyn UserStore>,
        analytics: Arc<dyn AnalyticsStore>,
        events: Arc<dyn EventLog>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                users,
                analytics,
                events,
                notifier,
                metrics: ServiceMetrics::default(),
                started_at: Instant::now(),
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    pub fn analytics(&self) -> &dyn AnalyticsStore {
        self.inner.analytics.as_ref()
    }

    pub fn events(&self) -> &dyn EventLog {
        self.inner.events.as_ref()
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.inner.notifier)
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.inner.metrics
    }

    pub fn uptime_secs(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    /// Extra lines for `/metrics`.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![("rgandja_uptime_seconds", self.uptime_secs())]
    }
}
