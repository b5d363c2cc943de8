//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port, interval, timeout > 0)
//! - Reject node URLs without a scheme or host
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::ExporterConfig;

/// Log levels accepted by the exporter.
pub const LOG_LEVELS: [&str; 2] = ["INFO", "DEBUG"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} isn't a valid port number")]
    InvalidPort(i64),

    #[error("{0} isn't a valid log level. It can be INFO or DEBUG")]
    InvalidLogLevel(String),

    #[error("{0:?} URLs aren't valid")]
    InvalidUrls(Vec<String>),

    #[error("ws_check_interval_secs must be greater than 0")]
    ZeroInterval,

    #[error("ws_timeout_secs must be greater than 0")]
    ZeroTimeout,
}

/// Validate a configuration.
pub fn validate_config(config: &ExporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.port == 0 {
        errors.push(ValidationError::InvalidPort(0));
    }

    if !LOG_LEVELS.contains(&config.log_level.to_uppercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.log_level.clone()));
    }

    let invalid_urls: Vec<String> = config
        .node_rpc_urls
        .iter()
        .filter(|url| !is_valid_url(url))
        .cloned()
        .collect();
    if !invalid_urls.is_empty() {
        errors.push(ValidationError::InvalidUrls(invalid_urls));
    }

    if config.ws_check_interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.ws_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A URL is usable when it has both a scheme and a host.
fn is_valid_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}
