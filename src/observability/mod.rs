//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (per-node gauges)
//!
//! Consumers:
//!     → stdout
//!     → /metrics (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
