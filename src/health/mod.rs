//! Node health evaluation.
//!
//! # Data Flow
//! ```text
//! Scheduler (scheduler.rs)
//!     first cycle inline, then every interval
//!     → Aggregator::run_cycle (aggregator.rs)
//!         → Probe each endpoint in order (probe.rs)
//!             connect → system_health → system_syncState → close
//!             → NodeStatus::is_healthy (status.rs)
//!         → set wss_alive{url} gauge
//!         → AND of all verdicts
//!     → ReadinessState::write (readiness.rs)
//!
//! HTTP readiness handler
//!     → ReadinessState::read
//! ```
//!
//! # Design Decisions
//! - Probe failures are data (a `false` verdict), never errors
//! - Readiness is written once per cycle, after all probes complete
//! - Gauges are written per probe and may mix two cycles while one runs

pub mod aggregator;
pub mod endpoint;
pub mod probe;
pub mod readiness;
pub mod rpc;
pub mod scheduler;
pub mod status;

pub use aggregator::Aggregator;
pub use endpoint::NodeEndpoint;
pub use probe::{query_node, NodeProbe, ProbeError, WsProbe};
pub use readiness::ReadinessState;
pub use scheduler::Scheduler;
pub use status::{HealthThresholds, NodeStatus};
