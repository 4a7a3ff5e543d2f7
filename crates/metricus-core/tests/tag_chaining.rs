//! Tag derivation: append-only, independently owned, original untouched.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use metricus_core::tags::{self, NO_TAGS};
use metricus_core::{Metrics, RecordingClient, StatsdMetrics};

fn facade() -> (Arc<RecordingClient>, StatsdMetrics) {
    let client = Arc::new(RecordingClient::new("", NO_TAGS));
    let m = StatsdMetrics::with_client(client.clone());
    (client, m)
}

fn strs(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn with_tags_appends_and_leaves_original_alone() {
    let (_, m) = facade();
    let a = strs(&["a:1", "b:2"]);
    let b = strs(&["c:3"]);

    let base = m.counter("jobs").with_tags(&strs(&["base:0"]));
    let derived = base.with_tags(&a).with_tags(&b);

    assert_eq!(base.tags(), strs(&["base:0"]).as_slice());
    assert_eq!(derived.tags(), strs(&["base:0", "a:1", "b:2", "c:3"]).as_slice());
}

#[test]
fn with_tag_matches_single_with_tags() {
    let (_, m) = facade();
    let t = m.timer("latency");
    assert_eq!(t.with_tag("route", "/x").tags(), t.with_tags(&strs(&["route:/x"])).tags());
    assert_eq!(tags::tag("k", "v"), "k:v");

    let g = m.gauge("depth");
    assert_eq!(g.with_tag("q", "in").tags(), strs(&["q:in"]).as_slice());
}

#[test]
fn duplicates_and_order_survive() {
    let (_, m) = facade();
    let c = m
        .counter("dup")
        .with_tag("env", "b")
        .with_tag("env", "a")
        .with_tag("env", "b");
    assert_eq!(c.tags(), strs(&["env:b", "env:a", "env:b"]).as_slice());
}

#[test]
fn zero_tags_still_derives_a_new_instrument() {
    let (client, m) = facade();
    let base = m.counter("hits").with_tag("x", "1");
    let same = base.with_tags(&[]);
    assert_eq!(same.tags(), base.tags());

    // Derivation shares the transport handle.
    same.inc(1);
    base.inc(1);
    assert_eq!(client.records().len(), 2);
}

#[test]
#[allow(deprecated)]
fn meter_tags_follow_its_counter() {
    let (_, m) = facade();
    let meter = m.meter("legacy").with_tag("a", "1");
    let derived = meter.with_tags(&strs(&["b:2"]));
    assert_eq!(meter.tags(), strs(&["a:1"]).as_slice());
    assert_eq!(derived.tags(), strs(&["a:1", "b:2"]).as_slice());
}

#[test]
#[should_panic(expected = "counter name cannot be empty")]
fn empty_counter_name_panics() {
    let (_, m) = facade();
    let _ = m.counter("");
}

#[test]
#[should_panic(expected = "gauge name cannot be empty")]
fn empty_gauge_name_panics() {
    let (_, m) = facade();
    let _ = m.gauge("");
}

#[test]
#[should_panic(expected = "timer name cannot be empty")]
fn empty_timer_name_panics() {
    let (_, m) = facade();
    let _ = m.timer("");
}

#[test]
#[allow(deprecated)]
#[should_panic(expected = "meter name cannot be empty")]
fn empty_meter_name_panics() {
    let (_, m) = facade();
    let _ = m.meter("");
}
