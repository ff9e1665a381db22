//! HTTP gateway that relays PDF documents to a text-extraction service.
//!
//! ```text
//!   GET /tika?pdf=<url>
//!          │
//!          ▼
//!   ┌─────────────┐  resolve + connect   ┌──────────────────────┐
//!   │   gateway   │─────────────────────▶│  extraction service  │
//!   │  (axum)     │   upload, half-close │  (raw TCP)           │
//!   │             │◀─────────────────────│                      │
//!   └──────┬──────┘   result until EOF   └──────────────────────┘
//!          │ HTTP GET (retried)
//!          ▼
//!     document URL
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod relay;
pub mod resilience;

pub use config::GatewayConfig;
pub use error::{GatewayError, RelayError};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use relay::{RelayPipeline, TargetUrl};
