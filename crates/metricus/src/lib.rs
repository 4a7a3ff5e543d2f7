//! Top-level facade crate for metricus.
//!
//! Re-exports the core facade and the HTTP instrumentation so users can depend
//! on a single crate.

pub mod core {
    pub use metricus_core::*;
}

pub mod http {
    pub use metricus_http::*;
}

pub use metricus_core::{metrics, set_metrics, setup_statsd, Counter, Gauge, Meter, Metrics, Timer};
