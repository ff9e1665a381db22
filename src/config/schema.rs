//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP listener settings.
    pub listener: ListenerConfig,

    /// Extraction service the documents are relayed to.
    pub downstream: DownstreamConfig,

    /// Retry policy shared by resolve, connect and fetch.
    pub retries: RetryConfig,

    /// Static index page.
    pub static_files: StaticFilesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub bind_host: String,

    /// Port to listen on.
    pub port: u16,
}

impl ListenerConfig {
    /// Full bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 9875,
        }
    }
}

/// Downstream extraction service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Hostname or IP of the extraction service.
    pub address: String,

    /// TCP port of the extraction service.
    pub port: u16,

    /// How long to wait for results once the upload is half-closed, in seconds.
    pub read_deadline_secs: u64,
}

impl DownstreamConfig {
    pub fn read_deadline(&self) -> Duration {
        Duration::from_secs(self.read_deadline_secs)
    }
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            address: "localhost".to_string(),
            port: 9876,
            read_deadline_secs: 60,
        }
    }
}

/// Retry configuration.
///
/// The interval is fixed: no exponential growth and no jitter.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,

    /// Pause between two attempts in milliseconds.
    pub interval_ms: u64,
}

impl RetryConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval_ms: 1000,
        }
    }
}

/// Static page configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// File served for every path other than the extraction route.
    pub index_path: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            index_path: "templates/index.html".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
