//! Downstream address resolution.

use std::io;
use std::net::SocketAddr;

use tokio::net::lookup_host;

use crate::config::DownstreamConfig;
use crate::error::RelayError;
use crate::resilience::RetryPolicy;

/// Resolve the configured downstream host and port to a socket address.
///
/// A lookup that returns no addresses counts as a failed attempt. The first
/// address returned wins.
pub async fn resolve_downstream(
    config: &DownstreamConfig,
    policy: &RetryPolicy,
) -> Result<SocketAddr, RelayError> {
    let address = format!("{}:{}", config.address, config.port);

    let addr = policy
        .run("resolve", || lookup_first(&address))
        .await
        .map_err(|source| RelayError::Resolution {
            address: address.clone(),
            source,
        })?;

    tracing::debug!(address = %address, resolved = %addr, "Downstream resolved");
    Ok(addr)
}

async fn lookup_first(address: &str) -> io::Result<SocketAddr> {
    lookup_host(address).await?.next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no addresses found for {address}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn resolves_ip_literal() {
        let config = DownstreamConfig {
            address: "127.0.0.1".into(),
            port: 9876,
            ..Default::default()
        };
        let addr = resolve_downstream(&config, &RetryPolicy::new(1, Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(addr, "127.0.0.1:9876".parse().unwrap());
    }

    #[tokio::test]
    async fn resolves_localhost_to_loopback() {
        let config = DownstreamConfig {
            address: "localhost".into(),
            port: 4000,
            ..Default::default()
        };
        let addr = resolve_downstream(&config, &RetryPolicy::new(1, Duration::ZERO))
            .await
            .unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 4000);
    }

    #[tokio::test]
    async fn unresolvable_host_is_a_resolution_error() {
        // `.invalid` is reserved and never resolves.
        let config = DownstreamConfig {
            address: "nonexistent.invalid".into(),
            port: 9876,
            ..Default::default()
        };
        let err = resolve_downstream(&config, &RetryPolicy::new(1, Duration::ZERO))
            .await
            .unwrap_err();
        assert!(
            matches!(&err, RelayError::Resolution { address, .. } if address == "nonexistent.invalid:9876"),
            "{err:?}"
        );
    }
}
