//! Instrument capability traits and their statsd-backed implementations.
//!
//! Every trait is object safe. Tag derivation returns a boxed, independently
//! owned instrument; the original is never touched. Mutation methods return
//! nothing: transport errors stop at the instrument and are logged at `debug`.

use std::time::{Duration, Instant};

pub mod counter;
pub mod gauge;
pub mod meter;
pub mod timer;

pub use counter::StatsdCounter;
pub use gauge::StatsdGauge;
pub use meter::CounterMeter;
pub use timer::{timed, StartedStatsdTimer, StatsdTimer, StopOnDrop};

pub trait Counter: Send + Sync {
    fn inc(&self, delta: i64);
    fn dec(&self, delta: i64);
    fn with_tags(&self, tags: &[String]) -> Box<dyn Counter>;
    fn with_tag(&self, key: &str, value: &str) -> Box<dyn Counter>;
    fn tags(&self) -> &[String];
}

pub trait Gauge: Send + Sync {
    fn update(&self, value: i64);
    fn with_tags(&self, tags: &[String]) -> Box<dyn Gauge>;
    fn with_tag(&self, key: &str, value: &str) -> Box<dyn Gauge>;
    fn tags(&self) -> &[String];
}

pub trait Timer: Send + Sync {
    /// Begin a session. Nothing is emitted until the session is stopped.
    fn start(&self) -> Box<dyn StartedTimer>;
    fn update(&self, value: Duration);
    fn update_since(&self, from: Instant);
    fn with_tags(&self, tags: &[String]) -> Box<dyn Timer>;
    fn with_tag(&self, key: &str, value: &str) -> Box<dyn Timer>;
    fn tags(&self) -> &[String];
}

/// A running timer session.
pub trait StartedTimer: Send {
    /// Record the time elapsed since `Timer::start`.
    fn stop(self: Box<Self>);
}

/// Legacy counter alias kept for call-site compatibility.
///
/// Use [`Counter`] in new code.
pub trait Meter: Send + Sync {
    fn mark(&self, value: i64);
    fn with_tags(&self, tags: &[String]) -> Box<dyn Meter>;
    fn with_tag(&self, key: &str, value: &str) -> Box<dyn Meter>;
    fn tags(&self) -> &[String];
}

/// Swallow an emission error.
pub(crate) fn swallow(kind: &'static str, name: &str, res: crate::Result<()>) {
    if let Err(e) = res {
        tracing::debug!(kind, metric = %name, code = e.code().as_str(), error = %e, "metric emission dropped");
    }
}
