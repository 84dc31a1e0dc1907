//! cors-relay entry point.
//!
//! Loads configuration, applies CLI overrides, and runs the relay server
//! until a shutdown signal arrives.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cors_relay::config::loader::load_config;
use cors_relay::config::validation::validate_config;
use cors_relay::lifecycle::Shutdown;
use cors_relay::observability::{logging, metrics};
use cors_relay::{RelayConfig, RelayServer};

#[derive(Parser)]
#[command(name = "cors-relay")]
#[command(about = "Stateless CORS-enabling HTTP forwarding relay", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the redirect hop budget.
    #[arg(long)]
    max_redirects: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(max_redirects) = cli.max_redirects {
        config.forwarding.max_redirects = max_redirects;
    }
    if let Err(errors) = validate_config(&config) {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(format!("invalid configuration: {joined}").into());
    }

    logging::init(&config.observability.log_level);

    tracing::info!("cors-relay v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_redirects = config.forwarding.max_redirects,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();
    let server = RelayServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
