//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI flag overrides (main.rs)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc with the server and relay pipeline
//! ```
//!
//! Config is read once at startup and never mutated afterwards.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    DownstreamConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, RetryConfig,
    StaticFilesConfig,
};
