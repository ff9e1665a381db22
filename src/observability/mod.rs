//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! Every HTTP response carries an `x-request-id`, and the trace layer tags
//! request spans with it.

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
