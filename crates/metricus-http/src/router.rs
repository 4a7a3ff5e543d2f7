//! Axum router wiring for the demo gateway.
//!
//! Every `/v1/*` route is wrapped in a [`TimedLayer`] named after the route.

use axum::{extract::State, routing::get, Router};

use crate::{app_state::AppState, ops, timed::TimedLayer};

pub fn build_router(state: AppState) -> Router {
    let metrics = state.metrics();
    let timed = |route: &str| {
        TimedLayer::with_metrics(metrics.as_ref(), "http.request", &[format!("route:{route}")])
    };

    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/v1/echo/:msg", get(echo).layer(timed("echo")))
        .with_state(state)
}

async fn echo(
    State(state): State<AppState>,
    axum::extract::Path(msg): axum::extract::Path<String>,
) -> String {
    state.count_request("echo");
    msg
}
