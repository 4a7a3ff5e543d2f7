//! Request timing middleware.
//!
//! `TimedLayer` wraps any tower service (an axum handler, route, or whole
//! router) with a timer session per call. The session is started before the
//! inner `call` and stopped by a drop guard, so it is recorded on success,
//! on error, on panic, and when the response future is dropped early.
//! Metrics never change the inner service's outcome.

use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use metricus_core::{metrics, Metrics, StopOnDrop, Timer};

#[derive(Clone)]
pub struct TimedLayer {
    timer: Arc<dyn Timer>,
}

impl TimedLayer {
    /// Time requests under `name` on the process default facade.
    ///
    /// # Panics
    /// If `name` is empty.
    pub fn new(name: &str, tags: &[String]) -> Self {
        Self::with_metrics(metrics().as_ref(), name, tags)
    }

    /// Time requests under `name` on an explicit facade.
    ///
    /// # Panics
    /// If `name` is empty.
    pub fn with_metrics(metrics: &dyn Metrics, name: &str, tags: &[String]) -> Self {
        assert!(!name.is_empty(), "handler name cannot be empty");
        Self {
            timer: Arc::from(metrics.timer(name).with_tags(tags)),
        }
    }

    pub fn timer(&self) -> &dyn Timer {
        self.timer.as_ref()
    }
}

impl<S> Layer<S> for TimedLayer {
    type Service = TimedService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimedService {
            inner,
            timer: Arc::clone(&self.timer),
        }
    }
}

#[derive(Clone)]
pub struct TimedService<S> {
    inner: S,
    timer: Arc<dyn Timer>,
}

impl<S, Req> Service<Req> for TimedService<S>
where
    S: Service<Req>,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<S::Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Req) -> Self::Future {
        let session = StopOnDrop::new(self.timer.start());
        let fut = self.inner.call(req);
        Box::pin(async move {
            let _session = session;
            fut.await
        })
    }
}
