//! Stats transport.
//!
//! `StatsClient` is the boundary every instrument emits through. The namespace
//! prefix and global tags live on the client and are applied to every call;
//! instruments only pass their own name and tags.
//!
//! `UdpStatsClient` speaks the DogStatsD line protocol over a connected,
//! non-blocking UDP socket:
//!
//! ```text
//! <namespace><name>:<value>|<type>[|@<rate>][|#<tag>,<tag>...]
//! ```

use std::fmt::{Display, Write};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use crate::error::{MetricsError, Result};

/// Default sampling rate for every instrument.
pub const DEFAULT_RATE: f64 = 1.0;

/// Measurement sink consumed by instruments.
///
/// Implementations must be safe for concurrent use; one client is shared by
/// every instrument derived from a facade.
pub trait StatsClient: Send + Sync {
    /// Add `delta` to a counter.
    fn count(&self, name: &str, delta: i64, tags: &[String], rate: f64) -> Result<()>;
    /// Set a gauge to `value`.
    fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()>;
    /// Record a duration.
    fn timing(&self, name: &str, value: Duration, tags: &[String], rate: f64) -> Result<()>;
}

/// Wire type suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Count,
    Gauge,
    Timing,
}

impl MetricType {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Count => "c",
            MetricType::Gauge => "g",
            MetricType::Timing => "ms",
        }
    }
}

/// Returns true when a measurement at `rate` should be sent.
pub(crate) fn should_sample(rate: f64) -> bool {
    rate >= 1.0 || (rate > 0.0 && rand::random::<f64>() < rate)
}

/// Timings go on the wire as fractional milliseconds.
pub(crate) fn millis(value: Duration) -> f64 {
    value.as_nanos() as f64 / 1_000_000.0
}

/// Render one DogStatsD line. Global tags come first, then the instrument's.
pub fn format_line(
    namespace: &str,
    global_tags: &[String],
    name: &str,
    value: impl Display,
    ty: MetricType,
    tags: &[String],
    rate: f64,
) -> String {
    let mut out = String::with_capacity(namespace.len() + name.len() + 32);
    let _ = write!(out, "{namespace}{name}:{value}|{}", ty.as_str());
    if rate < 1.0 {
        let _ = write!(out, "|@{rate}");
    }
    let mut all = global_tags.iter().chain(tags.iter()).peekable();
    if all.peek().is_some() {
        out.push_str("|#");
        for (i, t) in all.enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(t);
        }
    }
    out
}

/// Client that accepts and discards every measurement.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullClient;

impl StatsClient for NullClient {
    fn count(&self, _: &str, _: i64, _: &[String], _: f64) -> Result<()> {
        Ok(())
    }

    fn gauge(&self, _: &str, _: f64, _: &[String], _: f64) -> Result<()> {
        Ok(())
    }

    fn timing(&self, _: &str, _: Duration, _: &[String], _: f64) -> Result<()> {
        Ok(())
    }
}

/// Pick the address to connect to: the first IPv4 address if any, else the
/// first address. Statsd agents usually listen on IPv4 loopback while
/// `localhost` often resolves to `::1` first.
pub fn pick_target<I>(addrs: I) -> Option<SocketAddr>
where
    I: IntoIterator<Item = SocketAddr>,
{
    let mut first = None;
    for a in addrs {
        if a.is_ipv4() {
            return Some(a);
        }
        first.get_or_insert(a);
    }
    first
}

/// DogStatsD client over UDP.
#[derive(Debug)]
pub struct UdpStatsClient {
    socket: UdpSocket,
    addr: SocketAddr,
    namespace: String,
    tags: Vec<String>,
}

impl UdpStatsClient {
    /// Resolve `addr` and connect an ephemeral local socket to it.
    ///
    /// `namespace` and `tags` are stored as given; normalization is the
    /// facade's job.
    pub fn connect(addr: &str, namespace: String, tags: Vec<String>) -> Result<Self> {
        let transport = |source: io::Error| MetricsError::Transport {
            addr: addr.to_string(),
            source,
        };

        let target = pick_target(addr.to_socket_addrs().map_err(transport)?)
            .ok_or_else(|| {
                transport(io::Error::new(
                    io::ErrorKind::NotFound,
                    "address resolved to nothing",
                ))
            })?;

        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local).map_err(transport)?;
        socket.connect(target).map_err(transport)?;
        socket.set_nonblocking(true).map_err(transport)?;

        tracing::debug!(%target, namespace = %namespace, "statsd client connected");

        Ok(Self {
            socket,
            addr: target,
            namespace,
            tags,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn global_tags(&self) -> &[String] {
        &self.tags
    }

    fn send(
        &self,
        name: &str,
        value: impl Display,
        ty: MetricType,
        tags: &[String],
        rate: f64,
    ) -> Result<()> {
        if !should_sample(rate) {
            return Ok(());
        }
        let line = format_line(&self.namespace, &self.tags, name, value, ty, tags, rate);
        self.socket.send(line.as_bytes())?;
        Ok(())
    }
}

impl StatsClient for UdpStatsClient {
    fn count(&self, name: &str, delta: i64, tags: &[String], rate: f64) -> Result<()> {
        self.send(name, delta, MetricType::Count, tags, rate)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()> {
        self.send(name, value, MetricType::Gauge, tags, rate)
    }

    fn timing(&self, name: &str, value: Duration, tags: &[String], rate: f64) -> Result<()> {
        self.send(name, millis(value), MetricType::Timing, tags, rate)
    }
}
