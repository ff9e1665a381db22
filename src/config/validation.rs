//! Configuration validation.
//!
//! Serde handles the syntax; this checks value ranges. Every problem is
//! reported, not just the first one.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("retries.max_attempts must be at least 1")]
    NoAttempts,

    #[error("downstream.read_deadline_secs must be at least 1")]
    ZeroReadDeadline,

    #[error("downstream.address must not be empty")]
    EmptyDownstreamAddress,

    #[error("static_files.index_path must not be empty")]
    EmptyIndexPath,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::NoAttempts);
    }
    if config.downstream.read_deadline_secs == 0 {
        errors.push(ValidationError::ZeroReadDeadline);
    }
    if config.downstream.address.trim().is_empty() {
        errors.push(ValidationError::EmptyDownstreamAddress);
    }
    if config.static_files.index_path.is_empty() {
        errors.push(ValidationError::EmptyIndexPath);
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
