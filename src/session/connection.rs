//! Connection runtime and lifecycle tracking.
//!
//! # Responsibilities
//! - Own the serialized execution context for one session
//! - Route control requests through the transport
//! - Track in-flight liveness probes and fail them on close
//! - Generate unique connection IDs for tracing

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::event_loop::{EventLoop, Handle};
use crate::liveness::probe::{ProbeId, RaceState};
use crate::liveness::types::LivenessError;
use crate::session::transport::{Completion, ControlRequest, RequestError, Transport, TransportError};

/// Global atomic counter for connection IDs.
/// Relaxed ordering is sufficient since we only need uniqueness.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Mutable connection state owned by the execution context.
///
/// Only the context's consumer task ever touches this, so single-owner
/// access is enforced by ownership rather than a lock.
pub struct ConnectionCore {
    /// Protocol transport; a black box behind the trait seam.
    transport: Box<dyn Transport>,
    /// In-flight liveness probes, keyed by probe ID.
    pub(crate) probes: HashMap<ProbeId, RaceState>,
    /// Set once `close` has run; refuses further work.
    closed: bool,
}

impl ConnectionCore {
    fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            probes: HashMap::new(),
            closed: false,
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    /// Send the protocol-level liveness request, expecting an ack.
    pub(crate) fn send_liveness_request(&mut self, done: Completion) {
        self.transport.send_request(ControlRequest::liveness(), done);
    }

    /// Toggle kernel keepalive probing through the transport.
    pub(crate) fn set_keep_alive(&mut self, enabled: bool) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.transport.set_keep_alive(enabled)
    }

    /// Fail every in-flight probe and refuse further work.
    fn shutdown(&mut self) {
        self.closed = true;
        for (id, race) in self.probes.drain() {
            tracing::debug!(probe_id = %id, "failing in-flight probe: connection closed");
            race.resolve_with(Err(LivenessError::Rejected(RequestError::ConnectionClosed)));
        }
    }
}

/// Handle to a live connection and its execution context.
pub struct Connection {
    id: ConnectionId,
    handle: Handle<ConnectionCore>,
}

impl Connection {
    /// Spawn the connection runtime around `transport`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open<T: Transport>(transport: T) -> Self {
        let id = ConnectionId::new();
        let handle = EventLoop::spawn(ConnectionCore::new(Box::new(transport)));
        tracing::debug!(connection_id = %id, "connection runtime started");
        Self { id, handle }
    }

    /// Get this connection's ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub(crate) fn handle(&self) -> Handle<ConnectionCore> {
        self.handle.clone()
    }

    /// Number of liveness probes still racing on this connection.
    pub async fn pending_probes(&self) -> usize {
        self.handle
            .enqueue(|core| core.probes.len())
            .await
            .unwrap_or(0)
    }

    /// Timers scheduled on this connection's context that have neither
    /// fired nor been cancelled.
    pub fn active_timers(&self) -> usize {
        self.handle.active_timers()
    }

    /// Close the connection runtime.
    ///
    /// Every in-flight probe fails with a closed-connection rejection and
    /// releases its timer; later operations are refused.
    pub async fn close(&self) {
        let id = self.id;
        let _ = self
            .handle
            .enqueue(move |core| {
                if !core.is_closed() {
                    tracing::debug!(connection_id = %id, "connection runtime closing");
                    core.shutdown();
                }
            })
            .await;
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").field("id", &self.id).finish()
    }
}
