//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` takes precedence over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives for a configured level (`INFO` or `DEBUG`).
pub fn default_directives(log_level: &str) -> String {
    let level = if log_level.eq_ignore_ascii_case("DEBUG") {
        "debug"
    } else {
        "info"
    };
    format!("info,ws_health_exporter={level},tower_http={level}")
}

/// Initialize the global tracing subscriber. Call once, from `main`.
pub fn init_logging(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
