//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness (not timed)

use axum::{http::StatusCode, response::IntoResponse};

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
