//! Error types for the gateway.
//!
//! [`RelayError`] covers everything that can go wrong between the gateway and
//! its two network peers. [`GatewayError`] is what the HTTP handlers return;
//! every variant renders as a normal 200 response whose body carries the
//! message, so callers that parse the body keep working.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body sent when the extraction route is called without a target URL.
pub const MISSING_TARGET_MESSAGE: &str = "You must supply a 'pdf' GET parameter (a URL)\n";

/// Body sent when the static index page cannot be opened.
pub const INDEX_UNAVAILABLE_MESSAGE: &str = "Error opening the index file";

/// Marker that starts every in-band error body.
pub const ERROR_MARKER: &str = "Error\n";

/// Failures of the relay pipeline and its primitives.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Endpoint lookup failed after exhausting retries.
    #[error("failed to resolve {address}: {source}")]
    Resolution {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Transport connect failed after exhausting retries.
    #[error("failed to connect to {addr}: {source}")]
    Connection {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Source document GET failed after exhausting retries.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// I/O failure while moving bytes in either direction.
    #[error("relay I/O failed: {0}")]
    Copy(#[source] io::Error),

    /// No response from the extraction service before the read deadline.
    #[error("no response from extraction service within {}s", .0.as_secs())]
    Timeout(Duration),
}

impl RelayError {
    /// Classify an error raised while reading the extraction result.
    pub fn from_read(err: io::Error, deadline: Duration) -> Self {
        if err.kind() == io::ErrorKind::TimedOut {
            RelayError::Timeout(deadline)
        } else {
            RelayError::Copy(err)
        }
    }

    /// In-band body text for this error.
    pub fn to_body(&self) -> String {
        format!("{ERROR_MARKER}{self}")
    }
}

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The `pdf` parameter was missing or empty.
    #[error("missing 'pdf' parameter")]
    MissingTarget,

    /// The static index file could not be opened.
    #[error("cannot open index file {path}: {source}")]
    IndexFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::MissingTarget => MISSING_TARGET_MESSAGE.into_response(),
            GatewayError::IndexFile { .. } => INDEX_UNAVAILABLE_MESSAGE.into_response(),
            GatewayError::Relay(err) => err.to_body().into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn read_errors_are_classified() {
        let deadline = Duration::from_secs(60);

        let timeout = RelayError::from_read(io::Error::from(io::ErrorKind::TimedOut), deadline);
        assert!(matches!(timeout, RelayError::Timeout(d) if d == deadline));
        assert_eq!(
            timeout.to_body(),
            "Error\nno response from extraction service within 60s"
        );

        let reset = RelayError::from_read(io::Error::from(io::ErrorKind::ConnectionReset), deadline);
        assert!(matches!(reset, RelayError::Copy(_)));
    }

    #[test]
    fn connection_error_keeps_cause() {
        let err = RelayError::Connection {
            addr: "127.0.0.1:9876".parse().unwrap(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
        };
        assert_eq!(
            err.to_string(),
            "failed to connect to 127.0.0.1:9876: connection refused"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn every_gateway_error_is_a_200() {
        let errors = [
            GatewayError::MissingTarget,
            GatewayError::IndexFile {
                path: "templates/index.html".into(),
                source: io::Error::from(io::ErrorKind::NotFound),
            },
            GatewayError::Relay(RelayError::Copy(io::Error::from(io::ErrorKind::BrokenPipe))),
        ];

        for err in errors {
            assert_eq!(err.into_response().status(), StatusCode::OK);
        }
    }
}
