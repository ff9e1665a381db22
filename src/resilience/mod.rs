//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to a network peer:
//!     → retries.rs (fixed-interval, fixed-count retry of resolve/connect/fetch)
//!     → timeouts.rs (read deadline on the downstream result stream)
//! ```
//!
//! Only the three setup calls are retried. Copy and read failures surface
//! immediately.

pub mod retries;
pub mod timeouts;

pub use retries::RetryPolicy;
pub use timeouts::DeadlineReader;
