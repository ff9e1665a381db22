//! Document relay subsystem.
//!
//! # Data Flow
//! ```text
//! TargetUrl (validated, non-empty)
//!     → fetcher.rs (HTTP GET, retried)
//!     → pipeline.rs (resolve, connect, upload, half-close)
//!     → ExtractionStream (deadline-bounded read side)
//! ```

pub mod fetcher;
pub mod pipeline;

use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, ReadBuf};
use tokio::net::TcpStream;

use crate::error::GatewayError;
use crate::resilience::DeadlineReader;

pub use fetcher::SourceFetcher;
pub use pipeline::RelayPipeline;

/// Caller-supplied URL of the document to relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(String);

impl TargetUrl {
    /// Reject empty values before any network activity.
    pub fn new(raw: impl Into<String>) -> Result<Self, GatewayError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(GatewayError::MissingTarget);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read side of a downstream connection whose write side is already closed.
///
/// Reads fail with `TimedOut` once the read deadline has passed.
#[derive(Debug)]
pub struct ExtractionStream {
    reader: DeadlineReader<TcpStream>,
    read_deadline: Duration,
}

impl ExtractionStream {
    pub fn new(conn: TcpStream, read_deadline: Duration) -> Self {
        Self {
            reader: DeadlineReader::new(conn, read_deadline),
            read_deadline,
        }
    }

    /// Length of the deadline measured from the half-close.
    pub fn read_deadline(&self) -> Duration {
        self.read_deadline
    }
}

impl AsyncRead for ExtractionStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().reader).poll_read(cx, buf)
    }
}
