//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → server.rs (Axum setup, request ID, trace span)
//!     → handlers.rs (route: /tika or index page)
//!     → request.rs (pull `pdf` from query or form body)
//!     → [relay pipeline uploads the document]
//!     → response.rs (stream the extraction result)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, GatewayServer};
