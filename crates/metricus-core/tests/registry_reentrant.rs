//! Lazy initialization while a tracing layer itself emits through the default
//! facade. Own test binary: the global slot must start empty.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::UdpSocket;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use metricus_core::metrics;

/// Counts every log event on the process default facade.
struct EventCounter;

impl<S: Subscriber> Layer<S> for EventCounter {
    fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
        metrics().counter("log.events").inc(1);
    }
}

#[test]
fn layer_reading_default_during_init_does_not_block() {
    let sock = UdpSocket::bind("127.0.0.1:0").unwrap();
    sock.set_read_timeout(Some(Duration::from_millis(200))).unwrap();
    std::env::set_var("METRICS_PREFIX", "reentrant");
    std::env::set_var("STATSD_HOST", sock.local_addr().unwrap().to_string());

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let subscriber = tracing_subscriber::registry().with(EventCounter);
        tracing::subscriber::with_default(subscriber, || {
            metrics().counter("boot").inc(1);
        });
        tx.send(()).unwrap();
    });
    rx.recv_timeout(Duration::from_secs(5))
        .expect("metrics() must return while its own init logs are observed");

    // The post-init log reached the real client, not the placeholder.
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut lines = Vec::new();
    let mut buf = [0u8; 256];
    while Instant::now() < deadline {
        if let Ok(n) = sock.recv(&mut buf) {
            lines.push(String::from_utf8(buf[..n].to_vec()).unwrap());
            if lines.iter().any(|l| l == "reentrant.log.events:1|c")
                && lines.iter().any(|l| l == "reentrant.boot:1|c")
            {
                return;
            }
        }
    }
    panic!("expected log.events and boot lines, got {lines:?}");
}
