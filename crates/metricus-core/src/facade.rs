//! Metrics facade.
//!
//! `StatsdMetrics` owns the shared transport handle and hands out instruments
//! bound to it. Construction is the only fallible step; everything an
//! instrument does afterwards is fire-and-forget.

use std::sync::Arc;

use crate::client::{StatsClient, UdpStatsClient};
use crate::config::MetricsConfig;
use crate::error::{MetricsError, Result};
use crate::instruments::{
    Counter, CounterMeter, Gauge, Meter, StatsdCounter, StatsdGauge, StatsdTimer, Timer,
};
use crate::tags::{normalize_global, normalize_prefix};

/// Instrument factory.
///
/// Every method panics on an empty `name`; that is a programming error, not a
/// runtime condition.
pub trait Metrics: Send + Sync {
    fn timer(&self, name: &str) -> Box<dyn Timer>;
    fn gauge(&self, name: &str) -> Box<dyn Gauge>;
    fn counter(&self, name: &str) -> Box<dyn Counter>;
    #[deprecated(note = "use `Metrics::counter`; a meter is a counter under another name")]
    fn meter(&self, name: &str) -> Box<dyn Meter>;
}

/// Facade over a [`StatsClient`].
#[derive(Clone)]
pub struct StatsdMetrics {
    client: Arc<dyn StatsClient>,
}

impl StatsdMetrics {
    /// Connect a UDP statsd client.
    ///
    /// `prefix` gets a trailing `.` if missing. Global `tags` are trimmed,
    /// lowercased, and empty entries dropped.
    pub fn new<S: AsRef<str>>(prefix: &str, addr: &str, tags: &[S]) -> Result<Self> {
        if prefix.is_empty() {
            return Err(MetricsError::EmptyPrefix);
        }
        if addr.is_empty() {
            return Err(MetricsError::EmptyAddress);
        }

        let client = UdpStatsClient::connect(
            addr,
            normalize_prefix(prefix),
            normalize_global(tags),
        )?;

        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn from_config(cfg: &MetricsConfig) -> Result<Self> {
        Self::new(&cfg.prefix, &cfg.addr, cfg.tags.as_slice())
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Arc<dyn StatsClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> Arc<dyn StatsClient> {
        Arc::clone(&self.client)
    }
}

impl Metrics for StatsdMetrics {
    fn timer(&self, name: &str) -> Box<dyn Timer> {
        Box::new(StatsdTimer::new(name, self.client()))
    }

    fn gauge(&self, name: &str) -> Box<dyn Gauge> {
        Box::new(StatsdGauge::new(name, self.client()))
    }

    fn counter(&self, name: &str) -> Box<dyn Counter> {
        Box::new(StatsdCounter::new(name, self.client()))
    }

    fn meter(&self, name: &str) -> Box<dyn Meter> {
        assert!(!name.is_empty(), "meter name cannot be empty");
        Box::new(CounterMeter::new(self.counter(name)))
    }
}
