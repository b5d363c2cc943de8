//! Per-node status and the health verdict.

use std::time::Duration;

use crate::config::ExporterConfig;
use crate::health::rpc::{SyncState, SystemHealth};

/// Thresholds a node must meet to be considered healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthThresholds {
    /// Bound on every websocket operation of a probe.
    pub timeout: Duration,
    /// Maximum tolerated block drift; 0 disables the drift check.
    pub max_unsynced_block_drift: u64,
    pub min_peers: u64,
}

impl HealthThresholds {
    pub fn from_config(config: &ExporterConfig) -> Self {
        Self {
            timeout: config.ws_timeout(),
            max_unsynced_block_drift: config.node_max_unsynchronized_block_drift,
            min_peers: config.node_min_peers,
        }
    }
}

/// What one probe learned about one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStatus {
    pub is_syncing: bool,
    pub peers: u64,
    /// Reported for diagnostics only; does not affect the verdict.
    pub should_have_peers: bool,
    pub highest_block: u64,
    pub current_block: u64,
}

impl NodeStatus {
    pub fn new(health: SystemHealth, sync: SyncState) -> Self {
        Self {
            is_syncing: health.is_syncing,
            peers: health.peers,
            should_have_peers: health.should_have_peers,
            highest_block: sync.highest_block,
            current_block: sync.current_block,
        }
    }

    /// `highest_block - current_block`. Negative when the node is ahead of
    /// what it believes the best block is.
    pub fn unsynced_block_drift(&self) -> i128 {
        i128::from(self.highest_block) - i128::from(self.current_block)
    }

    /// Not syncing, enough peers, and (if enabled) drift within bounds.
    pub fn is_healthy(&self, thresholds: &HealthThresholds) -> bool {
        let drift_ok = thresholds.max_unsynced_block_drift == 0
            || self.unsynced_block_drift() <= i128::from(thresholds.max_unsynced_block_drift);

        !self.is_syncing && self.peers >= thresholds.min_peers && drift_ok
    }
}
