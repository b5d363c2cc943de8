//! Configuration loading.
//!
//! Layers, lowest precedence first: built-in defaults, optional TOML file,
//! `WSHE_*` environment variables, the legacy `debug` command-line switch.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::ExporterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment variable {var}={value:?} isn't a valid integer")]
    InvalidEnv { var: &'static str, value: String },

    #[error("{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, overlay and validate the configuration.
///
/// `lookup` resolves environment variables; production passes [`process_env`].
pub fn load_config<F>(
    path: Option<&Path>,
    force_debug: bool,
    lookup: F,
) -> Result<ExporterConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => ExporterConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;

    if force_debug {
        config.log_level = "DEBUG".to_string();
    }
    config.log_level = config.log_level.to_uppercase();

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Process environment lookup.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Overlay `WSHE_*` variables (and their legacy aliases) onto `config`.
pub fn apply_env_overrides<F>(config: &mut ExporterConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(level) = lookup("WSHE_LOG_LEVEL") {
        config.log_level = level;
    }
    if let Some(host) = lookup("WSHE_HOST") {
        config.host = host;
    }

    if let Some((var, raw)) = first_set(&lookup, &["WSHE_PORT", "PORT"]) {
        let port: i64 = parse_int(var, &raw)?;
        config.port = u16::try_from(port)
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| ConfigError::Validation(vec![ValidationError::InvalidPort(port)]))?;
    }

    if let Some(raw) = lookup("WSHE_WS_CHECK_INTERVAL") {
        config.ws_check_interval_secs = parse_int("WSHE_WS_CHECK_INTERVAL", &raw)?;
    }
    if let Some(raw) = lookup("WSHE_WS_TIMEOUT") {
        config.ws_timeout_secs = parse_int("WSHE_WS_TIMEOUT", &raw)?;
    }

    if let Some((_, raw)) = first_set(&lookup, &["WSHE_NODE_RPC_URLS", "NODE_URL"]) {
        config.node_rpc_urls = raw
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from)
            .collect();
    }

    // Negative thresholds are accepted and mean "no constraint".
    if let Some(raw) = lookup("WSHE_NODE_MAX_UNSYNCHRONIZED_BLOCK_DRIFT") {
        config.node_max_unsynchronized_block_drift =
            parse_non_negative("WSHE_NODE_MAX_UNSYNCHRONIZED_BLOCK_DRIFT", &raw)?;
    }
    if let Some(raw) = lookup("WSHE_NODE_MIN_PEERS") {
        config.node_min_peers = parse_non_negative("WSHE_NODE_MIN_PEERS", &raw)?;
    }

    Ok(())
}

fn first_set<F>(lookup: &F, vars: &[&'static str]) -> Option<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    vars.iter().find_map(|&var| lookup(var).map(|value| (var, value)))
}

fn parse_int<T: FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: raw.to_string(),
    })
}

/// Parse a signed integer, clamping negatives to zero.
fn parse_non_negative(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let value: i64 = parse_int(var, raw)?;
    Ok(u64::try_from(value).unwrap_or(0))
}
