//! Health and readiness exporter for JSON-RPC websocket blockchain nodes.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ExporterConfig;
pub use health::{Aggregator, ReadinessState, Scheduler, WsProbe};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
