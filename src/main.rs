//! ws-health-exporter
//!
//! Probes websocket JSON-RPC nodes on a fixed interval and republishes the
//! result for orchestrators.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────── ws-health-exporter ────────────────────────┐
//!   │                                                                    │
//!   │  ┌───────────┐   ┌────────────┐   ┌────────┐      ws://node-1      │
//!   │  │ scheduler │──▶│ aggregator │──▶│ probe  │──────────────────────▶│── node
//!   │  └───────────┘   └─────┬──────┘   └────────┘      ws://node-N      │
//!   │                        │                                           │
//!   │            ┌───────────┴───────────┐                               │
//!   │            ▼                       ▼                               │
//!   │    ┌──────────────┐        ┌──────────────┐                        │
//!   │    │  readiness   │        │ wss_alive{}  │                        │
//!   │    │    flag      │        │   gauges     │                        │
//!   │    └──────┬───────┘        └──────┬───────┘                        │
//!   │           ▼                       ▼                                │
//!   │   GET /health/readiness      GET /metrics                          │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use ws_health_exporter::config::{load_config, process_env};
use ws_health_exporter::lifecycle::{signals, startup};
use ws_health_exporter::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "ws-health-exporter", version)]
#[command(about = "Health and readiness exporter for websocket JSON-RPC nodes", long_about = None)]
struct Cli {
    /// Optional TOML config file; WSHE_* environment variables override it.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Legacy run mode; `debug` forces DEBUG logging.
    #[arg(value_enum)]
    mode: Option<Mode>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Debug,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), cli.mode.is_some(), process_env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("fatal run error! {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.log_level);
    tracing::info!("ws-health-exporter v{} starting", env!("CARGO_PKG_VERSION"));
    startup::log_config(&config);

    // wss:// endpoints need a process-wide rustls provider.
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        tracing::debug!("rustls crypto provider already installed");
    }

    let metrics = metrics::install_recorder()?;

    startup::run(config, metrics, signals::wait_for_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
