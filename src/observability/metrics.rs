//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wss_alive{url}` (gauge): 1 if the node passed its last probe, 0 otherwise
//!
//! # Design Decisions
//! - The aggregator writes through [`GaugeSink`] so it does not depend on a
//!   global recorder
//! - Exposition is rendered on demand from the Prometheus handle

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::health::endpoint::NodeEndpoint;

/// Per-node liveness gauge name.
pub const WSS_ALIVE: &str = "wss_alive";

/// Destination for per-node liveness values.
pub trait GaugeSink: Send + Sync {
    fn set_node_alive(&self, endpoint: &NodeEndpoint, alive: bool);
}

/// Writes gauges into the globally installed `metrics` recorder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusGauges;

impl GaugeSink for PrometheusGauges {
    fn set_node_alive(&self, endpoint: &NodeEndpoint, alive: bool) {
        let value = if alive { 1.0 } else { 0.0 };
        metrics::gauge!(WSS_ALIVE, "url" => endpoint.to_string()).set(value);
    }
}

/// Install the Prometheus recorder as the global `metrics` recorder.
///
/// The returned handle renders the exposition text for `/metrics`.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    metrics::describe_gauge!(WSS_ALIVE, "WebSocket alive");
    Ok(handle)
}
