//! Retry logic.
//!
//! # Responsibilities
//! - Run a fallible async operation up to `max_attempts` times
//! - Sleep a fixed interval between attempts (no growth, no jitter)
//! - Hand back the last error once the attempts are used up
//!
//! Resolve, connect and fetch all share this policy. Streaming a body that
//! already started is never retried here.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio_retry::strategy::FixedInterval;
use tokio_retry::Retry;

use crate::config::RetryConfig;
use crate::observability::metrics;

/// Fixed-interval, fixed-count retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    interval: Duration,
}

impl RetryPolicy {
    /// At least one attempt is always made.
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, config.interval())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `action` until it succeeds or the attempts are exhausted.
    ///
    /// `operation` names the call in logs and metrics. The error returned on
    /// exhaustion is the one produced by the final attempt.
    pub async fn run<F, Fut, T, E>(&self, operation: &'static str, mut action: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts;
        let strategy =
            FixedInterval::new(self.interval).take(max_attempts.saturating_sub(1) as usize);

        let mut attempt = 0u32;
        let result = Retry::spawn(strategy, || {
            attempt += 1;
            let current = attempt;
            let fut = action();
            async move {
                fut.await.inspect_err(|e| {
                    metrics::record_failed_attempt(operation);
                    tracing::warn!(
                        operation,
                        attempt = current,
                        max_attempts,
                        error = %e,
                        "Attempt failed"
                    );
                })
            }
        })
        .await;

        if let Err(ref e) = result {
            tracing::error!(operation, attempts = max_attempts, error = %e, "Retries exhausted");
        }
        result
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
