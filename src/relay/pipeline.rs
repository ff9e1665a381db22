//! The relay pipeline.
//!
//! One call to [`RelayPipeline::run`] handles one document:
//!
//! ```text
//! resolve ──▶ connect ──▶ fetch ──▶ copy ──▶ half-close ──▶ arm deadline
//!    │           │          │         │
//!    └─ retried ─┴─ retried ┘      not retried
//! ```
//!
//! The steps are strictly sequential. The extraction service reads until
//! EOF before it answers, so the write side must be shut down before the
//! result can be read, and the deadline only starts once it is.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::config::GatewayConfig;
use crate::error::RelayError;
use crate::net::{connect_downstream, resolve_downstream};
use crate::observability::metrics;
use crate::relay::fetcher::SourceFetcher;
use crate::relay::{ExtractionStream, TargetUrl};
use crate::resilience::RetryPolicy;

/// Relays documents from their URL to the extraction service.
#[derive(Debug, Clone)]
pub struct RelayPipeline {
    config: Arc<GatewayConfig>,
    policy: RetryPolicy,
    fetcher: SourceFetcher,
}

impl RelayPipeline {
    pub fn new(config: Arc<GatewayConfig>, client: reqwest::Client) -> Self {
        let policy = RetryPolicy::from_config(&config.retries);
        Self {
            fetcher: SourceFetcher::new(client, policy),
            config,
            policy,
        }
    }

    /// Upload the document behind `target` and return the result stream.
    ///
    /// Nothing is written downstream unless the fetch succeeds. The returned
    /// stream owns the connection; dropping it closes the socket.
    pub async fn run(&self, target: &TargetUrl) -> Result<ExtractionStream, RelayError> {
        let start = Instant::now();
        let downstream = &self.config.downstream;

        let addr = resolve_downstream(downstream, &self.policy).await?;
        let mut conn = connect_downstream(addr, &self.policy).await?;
        let source = self.fetcher.fetch(target).await?;

        let written = upload(source, &mut conn).await.map_err(RelayError::Copy)?;
        conn.shutdown().await.map_err(RelayError::Copy)?;

        metrics::record_upload(written, start);
        tracing::info!(
            url = %target,
            downstream = %addr,
            bytes = written,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Document uploaded, awaiting extraction result"
        );

        Ok(ExtractionStream::new(conn, downstream.read_deadline()))
    }
}

/// Drain the source body into the connection.
async fn upload(mut source: reqwest::Response, conn: &mut TcpStream) -> io::Result<u64> {
    let mut written = 0u64;
    while let Some(chunk) = source.chunk().await.map_err(io::Error::other)? {
        conn.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    conn.flush().await?;
    Ok(written)
}
