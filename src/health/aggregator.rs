//! One health check cycle across every configured node.

use crate::health::endpoint::NodeEndpoint;
use crate::health::probe::NodeProbe;
use crate::health::readiness::ReadinessState;
use crate::observability::metrics::GaugeSink;

/// Probes all endpoints, records per-node gauges and publishes readiness.
pub struct Aggregator<P, G> {
    endpoints: Vec<NodeEndpoint>,
    probe: P,
    gauges: G,
    readiness: ReadinessState,
}

impl<P: NodeProbe, G: GaugeSink> Aggregator<P, G> {
    pub fn new(endpoints: Vec<NodeEndpoint>, probe: P, gauges: G, readiness: ReadinessState) -> Self {
        Self {
            endpoints,
            probe,
            gauges,
            readiness,
        }
    }

    pub fn endpoints(&self) -> &[NodeEndpoint] {
        &self.endpoints
    }

    /// Run one cycle.
    ///
    /// Endpoints are probed sequentially in configured order. Readiness is
    /// written once, after every endpoint has been probed. Returns the
    /// aggregate, or `None` when there are no endpoints (readiness untouched).
    pub async fn run_cycle(&self) -> Option<bool> {
        if self.endpoints.is_empty() {
            tracing::debug!("No node endpoints configured, skipping cycle");
            return None;
        }

        let mut overall = true;
        for endpoint in &self.endpoints {
            let healthy = self.probe.probe(endpoint).await;
            self.gauges.set_node_alive(endpoint, healthy);
            overall = overall && healthy;
        }

        self.readiness.write(overall);
        tracing::debug!(
            ready = overall,
            endpoints = self.endpoints.len(),
            "Health check cycle complete"
        );
        Some(overall)
    }
}
