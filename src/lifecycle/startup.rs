//! Startup orchestration.
//!
//! Order: metrics exporter, HTTP client, listener, serve. Any startup error
//! is fatal; request errors never are.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::GatewayConfig;
use crate::http::GatewayServer;
use crate::lifecycle::Shutdown;
use crate::net::listener::{self, ListenerError};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bring the gateway up and serve until `shutdown` fires.
pub async fn start(config: GatewayConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = listener::bind(&config.listener).await?;
    let port = listener.local_addr()?.port();
    let server = GatewayServer::new(config)?;

    tracing::info!("Listening on http://127.0.0.1:{port}/");
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
