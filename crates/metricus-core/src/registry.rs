//! Process-wide default facade.
//!
//! Lifecycle: unset at process start, then set either explicitly through
//! [`set_metrics`] / [`setup_statsd`] or lazily by the first [`metrics`] call
//! from environment defaults. Replacing it later is allowed; last writer wins.
//!
//! The slot lock is only held to read or swap the `Arc`, never while the
//! facade is being built. Lazy builders are serialized by a separate mutex.
//! A `metrics()` call made on the initializing thread itself (for example
//! from a tracing layer reacting to the client's own connect log) gets a
//! discarding facade instead of waiting on itself.
//!
//! Code that needs isolation (tests, multi-tenant hosts) should take an
//! `Arc<dyn Metrics>` directly instead of reading the global slot.

use std::cell::Cell;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::client::NullClient;
use crate::config::MetricsConfig;
use crate::error::Result;
use crate::facade::{Metrics, StatsdMetrics};

static DEFAULT: RwLock<Option<Arc<dyn Metrics>>> = RwLock::new(None);
static LAZY_INIT: Mutex<()> = Mutex::new(());

thread_local! {
    static INITIALIZING: Cell<bool> = const { Cell::new(false) };
}

/// Clears the thread's initializing flag on every exit path.
struct InitFlag;

impl InitFlag {
    fn set() -> Self {
        INITIALIZING.with(|f| f.set(true));
        Self
    }
}

impl Drop for InitFlag {
    fn drop(&mut self) {
        INITIALIZING.with(|f| f.set(false));
    }
}

fn current() -> Option<Arc<dyn Metrics>> {
    DEFAULT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(Arc::clone)
}

/// Return the process default, initializing it from the environment on first
/// use. Exactly one initialization happens even under concurrent first calls.
///
/// If that initialization fails the process exits with status 1: this read
/// path has no way to report an error.
pub fn metrics() -> Arc<dyn Metrics> {
    if let Some(m) = current() {
        return m;
    }
    if INITIALIZING.with(Cell::get) {
        return Arc::new(StatsdMetrics::with_client(Arc::new(NullClient)));
    }

    let serial = LAZY_INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(m) = current() {
        return m;
    }

    let cfg = MetricsConfig::from_env();
    let built: Arc<dyn Metrics> = {
        let _flag = InitFlag::set();
        match StatsdMetrics::from_config(&cfg) {
            Ok(m) => Arc::new(m),
            Err(e) => {
                tracing::error!(prefix = %cfg.prefix, addr = %cfg.addr, error = %e, "could not initialize default metrics");
                std::process::exit(1);
            }
        }
    };

    // An explicit set_metrics that landed meanwhile wins.
    let installed = {
        let mut slot = DEFAULT.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slot.get_or_insert_with(|| built))
    };
    drop(serial);

    tracing::info!(prefix = %cfg.prefix, addr = %cfg.addr, "default metrics initialized from environment");
    installed
}

/// Replace the process default.
pub fn set_metrics(metrics: Arc<dyn Metrics>) {
    *DEFAULT.write().unwrap_or_else(PoisonError::into_inner) = Some(metrics);
}

/// Build a UDP statsd facade and install it as the process default.
pub fn setup_statsd<S: AsRef<str>>(prefix: &str, addr: &str, tags: &[S]) -> Result<()> {
    let m = StatsdMetrics::new(prefix, addr, tags)?;
    set_metrics(Arc::new(m));
    tracing::info!(prefix, addr, "statsd metrics installed as process default");
    Ok(())
}
