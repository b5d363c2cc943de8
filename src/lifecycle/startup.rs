//! Startup orchestration.
//!
//! # Order
//! 1. Build readiness, probe, aggregator
//! 2. Run the first health cycle (readiness populated before traffic)
//! 3. Start the periodic scheduler
//! 4. Bind the listener and serve until a signal arrives
//! 5. Stop the scheduler

use std::future::Future;

use metrics_exporter_prometheus::PrometheusHandle;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ExporterConfig;
use crate::health::{Aggregator, HealthThresholds, NodeEndpoint, ReadinessState, Scheduler, WsProbe};
use crate::http::{AppState, HttpServer};
use crate::lifecycle::Shutdown;
use crate::observability::metrics::PrometheusGauges;

/// Fatal runtime errors after configuration was accepted.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Log the effective configuration.
pub fn log_config(config: &ExporterConfig) {
    tracing::info!(
        host = %config.host,
        log_level = %config.log_level,
        node_max_unsynchronized_block_drift = config.node_max_unsynchronized_block_drift,
        node_min_peers = config.node_min_peers,
        node_rpc_urls = ?config.node_rpc_urls,
        port = config.port,
        ws_check_interval_secs = config.ws_check_interval_secs,
        ws_timeout_secs = config.ws_timeout_secs,
        "Configuration loaded"
    );
}

/// Run the exporter until `shutdown_signal` resolves.
pub async fn run<S>(
    config: ExporterConfig,
    metrics: PrometheusHandle,
    shutdown_signal: S,
) -> Result<(), StartupError>
where
    S: Future<Output = ()> + Send + 'static,
{
    let readiness = ReadinessState::new();
    let endpoints: Vec<NodeEndpoint> = config
        .node_rpc_urls
        .iter()
        .map(|url| NodeEndpoint::new(url.as_str()))
        .collect();
    let probe = WsProbe::new(HealthThresholds::from_config(&config));
    let aggregator = Aggregator::new(endpoints, probe, PrometheusGauges, readiness.clone());

    let shutdown = Shutdown::new();
    let scheduler_task = Scheduler::new(aggregator, config.check_interval())
        .start(shutdown.subscribe())
        .await;
    tracing::info!(ready = readiness.read(), "Initial health check complete");

    let address = config.bind_address();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(source) => {
            shutdown.trigger();
            return Err(StartupError::Bind { address, source });
        }
    };

    let server = HttpServer::new(AppState { readiness, metrics });
    let served = server.run(listener, shutdown_signal).await;

    shutdown.trigger();
    if let Err(e) = scheduler_task.await {
        tracing::error!(error = %e, "Health check scheduler task failed");
    }

    served.map_err(StartupError::Serve)
}
