//! metricus demo gateway.
//!
//! - Metrics config: YAML file from `METRICUS_CONFIG`, else `metricus.yaml`
//!   when present, else environment defaults (`METRICS_PREFIX`,
//!   `SOURCE_PROGRAM`, `STATSD_HOST`)
//! - Listen address: `METRICUS_LISTEN` (default `0.0.0.0:8080`)
//! - Routes: `/healthz`, `/v1/echo/:msg` (timed as `http.request`)

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use metricus_core::{config, set_metrics, Metrics, MetricsConfig, StatsdMetrics};
use metricus_http::{app_state, router};

const DEFAULT_CONFIG: &str = "metricus.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = match std::env::var("METRICUS_CONFIG") {
        Ok(path) => config::load_from_file(&path).expect("config load failed"),
        Err(_) if Path::new(DEFAULT_CONFIG).exists() => {
            config::load_from_file(DEFAULT_CONFIG).expect("config load failed")
        }
        Err(_) => MetricsConfig::from_env(),
    };
    let metrics: Arc<dyn Metrics> =
        Arc::new(StatsdMetrics::from_config(&cfg).expect("statsd client init failed"));
    set_metrics(Arc::clone(&metrics));

    let listen: SocketAddr = std::env::var("METRICUS_LISTEN")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .expect("METRICUS_LISTEN must be a valid SocketAddr");

    let app = router::build_router(app_state::AppState::new(metrics));

    tracing::info!(%listen, prefix = %cfg.prefix, statsd = %cfg.addr, "metricus-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
