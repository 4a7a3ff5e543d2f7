//! In-memory [`StatsClient`] for tests of code that emits metrics.
//!
//! Applies namespace and global tags exactly like the UDP client, but stores
//! each measurement instead of sending it. Sampling is not applied; the rate
//! is recorded as passed.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::client::StatsClient;
use crate::error::{MetricsError, Result};
use crate::tags::{normalize_global, normalize_prefix};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Count(i64),
    Gauge(f64),
    Timing(Duration),
}

/// One captured measurement. `name` includes the namespace; `tags` are global
/// tags followed by the instrument's.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub name: String,
    pub value: Value,
    pub tags: Vec<String>,
    pub rate: f64,
}

#[derive(Debug, Default)]
pub struct RecordingClient {
    namespace: String,
    tags: Vec<String>,
    records: Mutex<Vec<Recorded>>,
    failing: AtomicBool,
}

impl RecordingClient {
    /// Same normalization as [`crate::StatsdMetrics::new`]; an empty prefix
    /// means no namespace.
    pub fn new<S: AsRef<str>>(prefix: &str, tags: &[S]) -> Self {
        let namespace = if prefix.is_empty() {
            String::new()
        } else {
            normalize_prefix(prefix)
        };
        Self {
            namespace,
            tags: normalize_global(tags),
            ..Self::default()
        }
    }

    /// While set, every call fails and nothing is recorded.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub fn records(&self) -> Vec<Recorded> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Recorded>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, name: &str, value: Value, tags: &[String], rate: f64) -> Result<()> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(MetricsError::Emit(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "recording client set to fail",
            )));
        }
        let mut all = Vec::with_capacity(self.tags.len() + tags.len());
        all.extend_from_slice(&self.tags);
        all.extend_from_slice(tags);
        self.lock().push(Recorded {
            name: format!("{}{}", self.namespace, name),
            value,
            tags: all,
            rate,
        });
        Ok(())
    }
}

impl StatsClient for RecordingClient {
    fn count(&self, name: &str, delta: i64, tags: &[String], rate: f64) -> Result<()> {
        self.record(name, Value::Count(delta), tags, rate)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()> {
        self.record(name, Value::Gauge(value), tags, rate)
    }

    fn timing(&self, name: &str, value: Duration, tags: &[String], rate: f64) -> Result<()> {
        self.record(name, Value::Timing(value), tags, rate)
    }
}
