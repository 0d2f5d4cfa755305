//! Session runtime subsystem.
//!
//! # Data Flow
//! ```text
//! Caller (any task)
//!     → connection.rs (handle; crosses onto the execution context)
//!     → transport.rs (trait seam; protocol framing lives outside this crate)
//!     → completion callbacks re-enter the context as queued closures
//! ```
//!
//! # Design Decisions
//! - One execution context per connection; all connection state lives there
//! - The transport is a black box delivering exactly one completion per request
//! - Closing the connection fails every in-flight probe explicitly

pub mod connection;
pub mod transport;

pub use connection::{Connection, ConnectionId};
pub use transport::{ControlRequest, RequestError, Transport, TransportError};
