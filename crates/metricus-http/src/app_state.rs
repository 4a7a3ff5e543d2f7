//! Shared application state for the demo gateway.

use std::sync::Arc;

use metricus_core::{Counter, Metrics};

#[derive(Clone)]
pub struct AppState {
    metrics: Arc<dyn Metrics>,
    requests: Arc<dyn Counter>,
}

impl AppState {
    pub fn new(metrics: Arc<dyn Metrics>) -> Self {
        let requests = Arc::from(metrics.counter("http.requests"));
        Self { metrics, requests }
    }

    pub fn metrics(&self) -> Arc<dyn Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Count one request for `route`.
    pub fn count_request(&self, route: &str) {
        self.requests.with_tag("route", route).inc(1);
    }
}
