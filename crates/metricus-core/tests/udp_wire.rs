//! DogStatsD lines on a real loopback socket.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use metricus_core::client::{format_line, pick_target, MetricType};
use metricus_core::tags::NO_TAGS;
use metricus_core::{ErrorCode, Metrics, StatsdMetrics};

fn listener() -> (UdpSocket, String) {
    let sock = UdpSocket::bind("127.0.0.1:0").unwrap();
    sock.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    let addr = sock.local_addr().unwrap().to_string();
    (sock, addr)
}

fn recv_line(sock: &UdpSocket) -> String {
    let mut buf = [0u8; 1024];
    let n = sock.recv(&mut buf).expect("datagram");
    String::from_utf8(buf[..n].to_vec()).unwrap()
}

#[test]
fn counter_line_carries_namespace_and_tags() {
    let (sock, addr) = listener();
    let m = StatsdMetrics::new("app", &addr, &["Region:EU"]).unwrap();

    m.counter("jobs").with_tag("queue", "hi").inc(3);
    assert_eq!(recv_line(&sock), "app.jobs:3|c|#region:eu,queue:hi");

    m.counter("jobs").dec(2);
    assert_eq!(recv_line(&sock), "app.jobs:-2|c|#region:eu");
}

#[test]
fn prefix_with_and_without_dot_emit_the_same_name() {
    let (sock, addr) = listener();
    let bare = StatsdMetrics::new("app", &addr, NO_TAGS).unwrap();
    let dotted = StatsdMetrics::new("app.", &addr, NO_TAGS).unwrap();

    bare.gauge("depth").update(4);
    let a = recv_line(&sock);
    dotted.gauge("depth").update(4);
    let b = recv_line(&sock);

    assert_eq!(a, "app.depth:4|g");
    assert_eq!(a, b);
}

#[test]
fn global_tags_are_trimmed_lowercased_and_filtered() {
    let (sock, addr) = listener();
    let m = StatsdMetrics::new("app", &addr, &["  Env:Prod ", "", "   ", "TEAM:core"]).unwrap();

    m.counter("c").inc(1);
    assert_eq!(recv_line(&sock), "app.c:1|c|#env:prod,team:core");
}

#[test]
fn timer_line_is_in_milliseconds() {
    let (sock, addr) = listener();
    let m = StatsdMetrics::new("app", &addr, NO_TAGS).unwrap();

    m.timer("lat").update(Duration::from_micros(1500));
    assert_eq!(recv_line(&sock), "app.lat:1.5|ms");
}

#[test]
fn sample_rate_below_one_is_on_the_wire() {
    let line = format_line("ns.", &[], "x", 1, MetricType::Count, &["a:b".into()], 0.5);
    assert_eq!(line, "ns.x:1|c|@0.5|#a:b");
}

#[test]
fn empty_prefix_or_addr_is_a_config_error() {
    let err = StatsdMetrics::new("", "127.0.0.1:8125", NO_TAGS).err().unwrap();
    assert_eq!(err.code(), ErrorCode::EmptyPrefix);

    let err = StatsdMetrics::new("app", "", NO_TAGS).err().unwrap();
    assert_eq!(err.code(), ErrorCode::EmptyAddress);
}

#[test]
fn malformed_addr_is_a_transport_error() {
    let err = StatsdMetrics::new("app", "not an address", NO_TAGS).err().unwrap();
    assert_eq!(err.code(), ErrorCode::Transport);
    assert_eq!(err.code().as_str(), "TRANSPORT");
}

#[test]
fn ipv4_is_preferred_over_earlier_ipv6() {
    let v6: SocketAddr = "[::1]:8125".parse().unwrap();
    let v4: SocketAddr = "127.0.0.1:8125".parse().unwrap();

    assert_eq!(pick_target([v6, v4]), Some(v4));
    assert_eq!(pick_target([v4, v6]), Some(v4));
    assert_eq!(pick_target([v6]), Some(v6));
    assert_eq!(pick_target(Vec::<SocketAddr>::new()), None);
}
