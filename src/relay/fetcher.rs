//! Source document download.

use crate::error::RelayError;
use crate::relay::TargetUrl;
use crate::resilience::RetryPolicy;

/// Build the HTTP client used for upstream fetches.
///
/// Idle connections are not kept: every fetch opens its own connection.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .user_agent(concat!("tika-proxy/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fetches source documents over HTTP.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl SourceFetcher {
    pub fn new(client: reqwest::Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// GET the target and return the response with its body still unread.
    ///
    /// Only sending the request and receiving the headers is retried. Any
    /// status code counts as success; the body is relayed as-is.
    pub async fn fetch(&self, target: &TargetUrl) -> Result<reqwest::Response, RelayError> {
        let response = self
            .policy
            .run("fetch", || self.client.get(target.as_str()).send())
            .await
            .map_err(|source| RelayError::Fetch {
                url: target.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(url = %target, status = %status, "Source fetched");
        } else {
            tracing::warn!(url = %target, status = %status, "Source returned non-success status");
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use axum::{routing::get, Router};
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn fetcher(attempts: u32) -> SourceFetcher {
        SourceFetcher::new(
            build_client().unwrap(),
            RetryPolicy::new(attempts, Duration::from_millis(10)),
        )
    }

    #[tokio::test]
    async fn returns_body_of_reachable_document() {
        let addr = serve(Router::new().route("/doc.pdf", get(|| async { "%PDF-1.7" }))).await;
        let target = TargetUrl::new(format!("http://{addr}/doc.pdf")).unwrap();

        let response = fetcher(1).fetch(&target).await.unwrap();
        assert_eq!(response.text().await.unwrap(), "%PDF-1.7");
    }

    #[tokio::test]
    async fn error_status_is_not_a_fetch_failure() {
        let addr = serve(Router::new()).await;
        let target = TargetUrl::new(format!("http://{addr}/missing.pdf")).unwrap();

        let response = fetcher(1).fetch(&target).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unreachable_source_is_fetch_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let target = TargetUrl::new(format!("http://{addr}/doc.pdf")).unwrap();

        let err = fetcher(2).fetch(&target).await.unwrap_err();
        assert!(matches!(err, RelayError::Fetch { ref url, .. } if url == target.as_str()));
    }
}
