//! metricus HTTP instrumentation.
//!
//! [`timed::TimedLayer`] times any tower service with a metricus timer. The
//! remaining modules wire a small demo gateway (`main.rs`) around it and are
//! also used by integration tests.

pub mod app_state;
pub mod ops;
pub mod router;
pub mod timed;

pub use timed::{TimedLayer, TimedService};
