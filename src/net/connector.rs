//! Downstream connection establishment.

use std::net::SocketAddr;

use tokio::net::TcpStream;

use crate::error::RelayError;
use crate::resilience::RetryPolicy;

/// Open a TCP connection to the extraction service.
///
/// The stream is unbuffered and owned by the caller; dropping it closes the
/// connection.
pub async fn connect_downstream(
    addr: SocketAddr,
    policy: &RetryPolicy,
) -> Result<TcpStream, RelayError> {
    let stream = policy
        .run("connect", || TcpStream::connect(addr))
        .await
        .map_err(|source| RelayError::Connection { addr, source })?;

    tracing::debug!(addr = %addr, "Connected to downstream");
    Ok(stream)
}
