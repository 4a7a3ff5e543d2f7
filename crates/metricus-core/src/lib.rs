//! metricus core: a small metrics facade over a statsd transport.
//!
//! Application code asks a [`Metrics`] facade for named instruments
//! ([`Counter`], [`Gauge`], [`Timer`], and the legacy [`Meter`]), optionally
//! derives tagged variants, and emits. The facade owns the transport handle,
//! its namespace prefix, and the global tags applied to every measurement.
//!
//! # Error policy
//! - Building a facade returns [`Result`]; empty prefix/address and transport
//!   setup failures are recoverable.
//! - An empty instrument name is a programming error and panics.
//! - Emission never fails from the caller's point of view.
//!
//! `unwrap`, `expect`, and `panic!` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`);
//! preconditions use `assert!`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod client;
pub mod config;
pub mod error;
pub mod facade;
pub mod instruments;
pub mod recording;
pub mod registry;
pub mod tags;

pub use client::{NullClient, StatsClient, UdpStatsClient, DEFAULT_RATE};
pub use config::MetricsConfig;
pub use error::{ErrorCode, MetricsError, Result};
pub use facade::{Metrics, StatsdMetrics};
pub use instruments::{timed, Counter, Gauge, Meter, StartedTimer, StopOnDrop, Timer};
pub use recording::RecordingClient;
pub use registry::{metrics, set_metrics, setup_statsd};
