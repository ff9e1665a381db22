//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tika_proxy_requests_total` (counter): extraction requests by outcome
//! - `tika_proxy_failed_attempts_total` (counter): failed resolve/connect/fetch attempts
//! - `tika_proxy_upload_duration_seconds` (histogram): resolve through half-close
//! - `tika_proxy_upload_bytes_total` (counter): document bytes sent downstream
//!
//! Recording is a no-op until [`init_metrics`] installs an exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Outcome label for a handled extraction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Relayed,
    MissingTarget,
    Failed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Relayed => "relayed",
            Outcome::MissingTarget => "missing_target",
            Outcome::Failed => "failed",
        }
    }
}

pub fn record_request(outcome: Outcome) {
    counter!("tika_proxy_requests_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_failed_attempt(operation: &'static str) {
    counter!("tika_proxy_failed_attempts_total", "operation" => operation).increment(1);
}

pub fn record_upload(bytes: u64, start: Instant) {
    counter!("tika_proxy_upload_bytes_total").increment(bytes);
    histogram!("tika_proxy_upload_duration_seconds").record(start.elapsed().as_secs_f64());
}
