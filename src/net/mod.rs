//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming HTTP traffic
//!     → listener.rs (bind the gateway's port)
//!
//! Outgoing to the extraction service
//!     → resolver.rs (host:port → SocketAddr, retried)
//!     → connector.rs (SocketAddr → TcpStream, retried)
//! ```

pub mod connector;
pub mod listener;
pub mod resolver;

pub use connector::connect_downstream;
pub use resolver::resolve_downstream;
