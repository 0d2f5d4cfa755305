//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use session_liveness::session::transport::{
    Completion, ControlRequest, RequestError, Transport, TransportError,
};

/// Scripted responder behavior for a mock transport.
#[derive(Clone)]
pub enum Responder {
    /// Acknowledge every request after the given delay.
    AckAfter(Duration),
    /// Reject every request after the given delay.
    RejectAfter(Duration, RequestError),
    /// Never answer; models a zombie peer.
    Silent,
}

/// Transport test double standing in for a real protocol stack.
///
/// Clone the `Arc` fields before handing the transport to a connection to
/// keep observing it from the test body.
pub struct MockTransport {
    pub responder: Responder,
    pub requests_sent: Arc<AtomicUsize>,
    pub keep_alive: Arc<AtomicBool>,
}

impl MockTransport {
    pub fn new(responder: Responder) -> Self {
        Self {
            responder,
            requests_sent: Arc::new(AtomicUsize::new(0)),
            keep_alive: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn ack_after(delay: Duration) -> Self {
        Self::new(Responder::AckAfter(delay))
    }

    #[allow(dead_code)]
    pub fn reject_after(delay: Duration, error: RequestError) -> Self {
        Self::new(Responder::RejectAfter(delay, error))
    }

    pub fn silent() -> Self {
        Self::new(Responder::Silent)
    }
}

impl Transport for MockTransport {
    fn send_request(&mut self, request: ControlRequest, done: Completion) {
        assert!(request.want_ack, "liveness requests always want an ack");
        self.requests_sent.fetch_add(1, Ordering::SeqCst);

        match self.responder.clone() {
            Responder::AckAfter(delay) => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    done(Ok(()));
                });
            }
            Responder::RejectAfter(delay, error) => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    done(Err(error));
                });
            }
            Responder::Silent => {}
        }
    }

    fn set_keep_alive(&mut self, enabled: bool) -> Result<(), TransportError> {
        self.keep_alive.store(enabled, Ordering::SeqCst);
        Ok(())
    }
}
