//! Timer and timer sessions.
//!
//! A session captures `Instant::now()` at `start()` and reports through its
//! originating timer on `stop()`. Dropping a bare session records nothing;
//! wrap it in [`StopOnDrop`] when every exit path must be measured.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::client::{StatsClient, DEFAULT_RATE};
use crate::tags;

use super::{swallow, StartedTimer, Timer};

struct TimerInner {
    name: String,
    client: Arc<dyn StatsClient>,
    tags: Vec<String>,
}

/// Timer emitting `timing` measurements.
#[derive(Clone)]
pub struct StatsdTimer {
    inner: Arc<TimerInner>,
}

impl StatsdTimer {
    /// # Panics
    /// If `name` is empty.
    pub fn new(name: &str, client: Arc<dyn StatsClient>) -> Self {
        assert!(!name.is_empty(), "timer name cannot be empty");
        Self {
            inner: Arc::new(TimerInner {
                name: name.to_string(),
                client,
                tags: Vec::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }
}

impl Timer for StatsdTimer {
    fn start(&self) -> Box<dyn StartedTimer> {
        Box::new(StartedStatsdTimer {
            started: Instant::now(),
            underlying: self.clone(),
        })
    }

    fn update(&self, value: Duration) {
        let inner = &self.inner;
        swallow(
            "timer",
            &inner.name,
            inner
                .client
                .timing(&inner.name, value, &inner.tags, DEFAULT_RATE),
        );
    }

    fn update_since(&self, from: Instant) {
        self.update(Instant::now().saturating_duration_since(from));
    }

    fn with_tags(&self, extra: &[String]) -> Box<dyn Timer> {
        Box::new(Self {
            inner: Arc::new(TimerInner {
                name: self.inner.name.clone(),
                client: Arc::clone(&self.inner.client),
                tags: tags::append(&self.inner.tags, extra),
            }),
        })
    }

    fn with_tag(&self, key: &str, value: &str) -> Box<dyn Timer> {
        self.with_tags(&[tags::tag(key, value)])
    }

    fn tags(&self) -> &[String] {
        &self.inner.tags
    }
}

/// Session returned by [`StatsdTimer::start`].
pub struct StartedStatsdTimer {
    started: Instant,
    underlying: StatsdTimer,
}

impl StartedStatsdTimer {
    pub fn started_at(&self) -> Instant {
        self.started
    }
}

impl StartedTimer for StartedStatsdTimer {
    fn stop(self: Box<Self>) {
        self.underlying.update_since(self.started);
    }
}

/// Stops the wrapped session when dropped (return, `?`, panic unwind, or
/// future cancellation).
pub struct StopOnDrop {
    session: Option<Box<dyn StartedTimer>>,
}

impl StopOnDrop {
    pub fn new(session: Box<dyn StartedTimer>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Stop now instead of at scope exit.
    pub fn stop(mut self) {
        if let Some(s) = self.session.take() {
            s.stop();
        }
    }
}

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        if let Some(s) = self.session.take() {
            s.stop();
        }
    }
}

/// Run `work` inside a session of `timer`. The session is stopped even if
/// `work` panics.
pub fn timed<R>(timer: &dyn Timer, work: impl FnOnce() -> R) -> R {
    let _session = StopOnDrop::new(timer.start());
    work()
}
