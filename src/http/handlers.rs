//! Request handlers. They only read state the health subsystem computed.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;

pub const METRICS_PATH: &str = "/metrics";
pub const READINESS_PATH: &str = "/health/readiness";

/// Every route the server exposes, in site map order.
pub const ROUTES: [&str; 3] = ["/", METRICS_PATH, READINESS_PATH];

/// Body of the readiness response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessBody {
    pub status: String,
}

/// `GET /` — plain-text list of routes.
pub async fn site_map() -> String {
    let mut routes = String::from("Main Page:\n");
    for route in ROUTES {
        routes.push_str(route);
        routes.push('\n');
    }
    routes
}

/// `GET /metrics` — Prometheus exposition text.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics.render(),
    )
}

/// `GET /health/readiness` — `UP`/200 when every node passed the last cycle,
/// `DOWN`/500 otherwise.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessBody>) {
    if state.readiness.read() {
        (
            StatusCode::OK,
            Json(ReadinessBody {
                status: "UP".to_string(),
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ReadinessBody {
                status: "DOWN".to_string(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ReadinessState;
    use metrics_exporter_prometheus::PrometheusBuilder;

    fn state() -> AppState {
        AppState {
            readiness: ReadinessState::new(),
            metrics: PrometheusBuilder::new().build_recorder().handle(),
        }
    }

    #[tokio::test]
    async fn test_site_map() {
        assert_eq!(site_map().await, "Main Page:\n/\n/metrics\n/health/readiness\n");
    }

    #[tokio::test]
    async fn test_readiness_follows_state() {
        let state = state();

        let (status, Json(body)) = readiness(State(state.clone())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, "DOWN");

        state.readiness.write(true);
        let (status, Json(body)) = readiness(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "UP");
    }
}
