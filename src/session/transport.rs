//! Transport seam for the session runtime.
//!
//! # Responsibilities
//! - Define the boundary the connection drives: named control requests
//!   expecting an acknowledgment, and transport-level option changes
//! - Keep protocol framing and socket ownership outside this crate
//!
//! # Design Decisions
//! - Completions are one-shot callbacks; implementations must deliver
//!   exactly one completion per request, success or failure
//! - Request causes pass through unmodified so callers see the peer's
//!   actual failure, not a reinterpretation

use thiserror::Error;

/// One-shot completion callback for a control request.
pub type Completion = Box<dyn FnOnce(Result<(), RequestError>) + Send>;

/// A named control request sent on the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRequest {
    /// Protocol-level request name.
    pub name: &'static str,

    /// Whether the peer must acknowledge the request explicitly.
    pub want_ack: bool,
}

impl ControlRequest {
    /// The liveness probe request: a no-op at the protocol level, sent
    /// solely to confirm the peer still answers.
    pub fn liveness() -> Self {
        Self {
            name: "keepalive",
            want_ack: true,
        }
    }
}

/// Errors a control request can fail with.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    /// The peer answered but does not support this request.
    #[error("peer does not support {0:?} requests")]
    Unsupported(String),

    /// The connection closed before the request completed.
    #[error("connection closed")]
    ConnectionClosed,

    /// The transport failed to send or receive the request.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors from transport-level option changes.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport refused the socket option.
    #[error("socket option rejected: {0}")]
    OptionRejected(String),

    /// The connection is already closed.
    #[error("connection closed")]
    Closed,
}

/// The protocol transport owned by a connection.
///
/// Implementations are invoked only on the connection's execution context.
/// `send_request` must invoke `done` exactly once per call, from any task,
/// once the request is acknowledged or has failed. Never invoking `done`
/// models a wedged peer; the probe's own deadline covers that case.
pub trait Transport: Send + 'static {
    /// Send a control request; `done` fires once with the ack or the cause.
    fn send_request(&mut self, request: ControlRequest, done: Completion);

    /// Enable or disable kernel-level keepalive probing on the socket.
    fn set_keep_alive(&mut self, enabled: bool) -> Result<(), TransportError>;
}
