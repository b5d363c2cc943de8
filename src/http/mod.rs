//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! GET /                  → handlers::site_map
//! GET /metrics           → handlers::metrics   → PrometheusHandle::render
//! GET /health/readiness  → handlers::readiness → ReadinessState::read
//! ```

pub mod handlers;
pub mod server;

pub use handlers::ReadinessBody;
pub use server::{AppState, HttpServer};
