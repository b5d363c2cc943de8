//! Configuration schema definitions.
//!
//! All fields have defaults so a partial config file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Log level, `INFO` or `DEBUG`.
    pub log_level: String,

    /// Address the HTTP server binds to.
    pub host: String,

    /// Port the HTTP server binds to.
    pub port: u16,

    /// Seconds between two health check cycles.
    pub ws_check_interval_secs: u64,

    /// Per-operation websocket timeout in seconds.
    pub ws_timeout_secs: u64,

    /// Websocket JSON-RPC endpoints of the monitored nodes.
    pub node_rpc_urls: Vec<String>,

    /// Maximum allowed `highestBlock - currentBlock`. Zero disables the check.
    pub node_max_unsynchronized_block_drift: u64,

    /// Minimum number of peers a healthy node must report.
    pub node_min_peers: u64,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8001,
            ws_check_interval_secs: 10,
            ws_timeout_secs: 60,
            node_rpc_urls: vec!["ws://127.0.0.1:5556".to_string()],
            node_max_unsynchronized_block_drift: 0,
            node_min_peers: 10,
        }
    }
}

impl ExporterConfig {
    /// Socket address string for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.ws_check_interval_secs)
    }

    pub fn ws_timeout(&self) -> Duration {
        Duration::from_secs(self.ws_timeout_secs)
    }
}
