//! tika-proxy
//!
//! Fetches a PDF from a caller-supplied URL, streams it to an extraction
//! service over raw TCP and streams the service's answer back.

use std::path::PathBuf;

use clap::Parser;

use tika_proxy::config::validation::validate_config;
use tika_proxy::config::{load_config, ConfigError, GatewayConfig};
use tika_proxy::lifecycle::{self, signals, Shutdown};
use tika_proxy::observability::init_logging;

#[derive(Parser, Debug)]
#[command(name = "tika-proxy")]
#[command(about = "Relay PDF documents from a URL to a Tika server", long_about = None)]
struct Cli {
    /// TOML configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// The port of the tika app
    #[arg(long = "tika-port")]
    tika_port: Option<u16>,

    /// The address of the tika app
    #[arg(long = "tika-address")]
    tika_address: Option<String>,

    /// File served for every path except /tika
    #[arg(long)]
    index: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut GatewayConfig) {
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(port) = self.tika_port {
            config.downstream.port = port;
        }
        if let Some(address) = self.tika_address {
            config.downstream.address = address;
        }
        if let Some(index) = self.index {
            config.static_files.index_path = index.to_string_lossy().into_owned();
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability.log_level);
    tracing::info!("tika-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        port = config.listener.port,
        tika_address = %config.downstream.address,
        tika_port = config.downstream.port,
        read_deadline_secs = config.downstream.read_deadline_secs,
        max_attempts = config.retries.max_attempts,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(&shutdown);

    lifecycle::start(config, &shutdown).await?;
    Ok(())
}
