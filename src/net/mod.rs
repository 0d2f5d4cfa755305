//! Network layer helpers.
//!
//! # Design Decisions
//! - Protocol framing and socket ownership live in the embedding
//!   application; this module only covers the socket-option plumbing a
//!   transport implementation needs

pub mod keepalive;

pub use keepalive::configure_tcp_keepalive;
