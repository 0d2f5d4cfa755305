//! Application-level liveness probe.
//!
//! # Responsibilities
//! - Send one keepalive request per check
//! - Race the acknowledgment against a deadline on the connection's context
//! - Resolve exactly once; cancel the deadline when the response wins
//!
//! # Design Decisions
//! - All race state lives in the connection core's pending table and is
//!   only touched on the context, so the race needs no locking
//! - Presence in the table doubles as the "unresolved" flag: the first
//!   event removes the entry, the second finds nothing and is a no-op
//! - The caller cannot cancel an in-flight probe; a probe always runs to
//!   one of its three terminal outcomes on the connection's context

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::oneshot;

use crate::config::schema::LivenessConfig;
use crate::event_loop::{Handle, TimerHandle};
use crate::liveness::types::{LivenessError, LivenessResult};
use crate::observability::metrics;
use crate::session::connection::{Connection, ConnectionCore};
use crate::session::transport::RequestError;

/// Global atomic counter for probe IDs.
/// Relaxed ordering is sufficient since we only need uniqueness.
static PROBE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one probe invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeId(u64);

impl ProbeId {
    /// Generate a new unique probe ID.
    pub fn new() -> Self {
        Self(PROBE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ProbeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProbeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "probe-{}", self.0)
    }
}

/// Per-probe race bookkeeping, touched only on the connection's context.
///
/// An entry exists in the pending table exactly while the race is open.
/// Whichever of the deadline or the response runs first removes the entry
/// and delivers the outcome; the loser finds nothing and does nothing.
pub(crate) struct RaceState {
    /// Channel back to the suspended caller.
    reply: oneshot::Sender<LivenessResult<()>>,
    /// The pending deadline; cancelled when the response wins.
    timer: Option<TimerHandle>,
}

impl RaceState {
    /// Deliver the outcome, cancelling the deadline if it has not fired.
    pub(crate) fn resolve_with(mut self, outcome: LivenessResult<()>) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        let _ = self.reply.send(outcome);
    }
}

/// Issues liveness checks on a connection.
///
/// Cheap to clone; clones share the underlying connection context, and
/// concurrent checks are independent races.
#[derive(Clone)]
pub struct LivenessProbe {
    handle: Handle<ConnectionCore>,
    default_timeout: Duration,
}

impl LivenessProbe {
    /// Default probe timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a probe bound to `connection` with the default timeout.
    pub fn new(connection: &Connection) -> Self {
        Self {
            handle: connection.handle(),
            default_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Create a probe bound to `connection` using the configured timeout.
    pub fn with_config(connection: &Connection, config: &LivenessConfig) -> Self {
        Self {
            handle: connection.handle(),
            default_timeout: config.probe_timeout(),
        }
    }

    /// Run one liveness check with the probe's default timeout.
    pub async fn check_default(&self) -> LivenessResult<()> {
        self.check(self.default_timeout).await
    }

    /// Run one liveness check with an explicit timeout.
    ///
    /// Sends exactly one keepalive request and schedules exactly one
    /// deadline on the connection's execution context. Resolves `Ok(())`
    /// on acknowledgment, [`LivenessError::Rejected`] when the peer or
    /// transport fails the request, [`LivenessError::TimedOut`] when
    /// neither arrives in time.
    ///
    /// A zero timeout is treated as an immediately expiring deadline: the
    /// request is still sent, and the check reports a timeout unless the
    /// response is already queued ahead of the deadline on the context.
    ///
    /// Dropping the returned future abandons the wait only; the race still
    /// runs to a terminal state on the connection's context and releases
    /// its timer there.
    pub async fn check(&self, timeout: Duration) -> LivenessResult<()> {
        let id = ProbeId::new();
        let (reply_tx, reply_rx) = oneshot::channel();
        let handle = self.handle.clone();

        let submitted = self
            .handle
            .submit(move |core| start(core, &handle, id, timeout, reply_tx));
        if submitted.is_err() {
            return Err(LivenessError::Rejected(RequestError::ConnectionClosed));
        }

        match reply_rx.await {
            Ok(outcome) => outcome,
            // Context went away mid-race; its pending state died with it.
            Err(_) => Err(LivenessError::Rejected(RequestError::ConnectionClosed)),
        }
    }
}

/// Begin the race. Runs on the connection's context.
fn start(
    core: &mut ConnectionCore,
    handle: &Handle<ConnectionCore>,
    id: ProbeId,
    timeout: Duration,
    reply: oneshot::Sender<LivenessResult<()>>,
) {
    if core.is_closed() {
        let _ = reply.send(Err(LivenessError::Rejected(RequestError::ConnectionClosed)));
        return;
    }

    tracing::debug!(
        probe_id = %id,
        timeout_ms = timeout.as_millis() as u64,
        "liveness probe started"
    );

    let timer = handle.schedule_after(timeout, move |core| {
        resolve(core, id, Err(LivenessError::TimedOut { after: timeout }));
    });
    core.probes.insert(
        id,
        RaceState {
            reply,
            timer: Some(timer),
        },
    );

    let completion = handle.clone();
    core.send_liveness_request(Box::new(move |result| {
        let outcome = result.map_err(LivenessError::Rejected);
        let _ = completion.submit(move |core| resolve(core, id, outcome));
    }));
}

/// Deliver a terminal outcome. Runs on the connection's context; the
/// second of the two racing events finds no entry and is a no-op.
fn resolve(core: &mut ConnectionCore, id: ProbeId, outcome: LivenessResult<()>) {
    let Some(race) = core.probes.remove(&id) else {
        return;
    };

    match &outcome {
        Ok(()) => {
            tracing::debug!(probe_id = %id, "liveness probe acknowledged");
            metrics::record_probe_outcome("acknowledged");
        }
        Err(LivenessError::TimedOut { after }) => {
            tracing::warn!(
                probe_id = %id,
                timeout_ms = after.as_millis() as u64,
                "liveness probe timed out; connection suspected dead"
            );
            metrics::record_probe_outcome("timed_out");
        }
        Err(LivenessError::Rejected(cause)) => {
            tracing::warn!(probe_id = %id, cause = %cause, "liveness probe rejected");
            metrics::record_probe_outcome("rejected");
        }
    }

    race.resolve_with(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::transport::{Completion, ControlRequest, Transport, TransportError};

    /// Never answers; probes against it can only time out.
    struct SilentTransport;

    impl Transport for SilentTransport {
        fn send_request(&mut self, _request: ControlRequest, _done: Completion) {}

        fn set_keep_alive(&mut self, _enabled: bool) -> Result<(), TransportError> {
            Ok(())
        }
    }

    /// Fails every request synchronously with the given cause.
    struct RejectingTransport(&'static str);

    impl Transport for RejectingTransport {
        fn send_request(&mut self, _request: ControlRequest, done: Completion) {
            done(Err(RequestError::Unsupported(self.0.to_string())));
        }

        fn set_keep_alive(&mut self, _enabled: bool) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[test]
    fn probe_id_unique() {
        assert_ne!(ProbeId::new(), ProbeId::new());
    }

    #[tokio::test]
    async fn second_resolution_is_swallowed() {
        let conn = Connection::open(SilentTransport);
        let handle = conn.handle();
        let (reply_tx, reply_rx) = oneshot::channel();
        let id = ProbeId::new();

        let h = handle.clone();
        handle
            .submit(move |core| start(core, &h, id, Duration::from_secs(60), reply_tx))
            .unwrap();
        handle.submit(move |core| resolve(core, id, Ok(()))).unwrap();
        handle
            .submit(move |core| {
                resolve(
                    core,
                    id,
                    Err(LivenessError::TimedOut {
                        after: Duration::from_secs(60),
                    }),
                )
            })
            .unwrap();

        assert!(reply_rx.await.unwrap().is_ok());
        assert_eq!(conn.pending_probes().await, 0);
    }

    #[tokio::test]
    async fn rejection_cause_passes_through() {
        let conn = Connection::open(RejectingTransport("keepalive"));
        let probe = LivenessProbe::new(&conn);

        let err = probe.check(Duration::from_secs(5)).await.unwrap_err();
        match err {
            LivenessError::Rejected(RequestError::Unsupported(name)) => {
                assert_eq!(name, "keepalive");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(conn.pending_probes().await, 0);
    }

    #[tokio::test]
    async fn check_after_close_is_rejected() {
        let conn = Connection::open(SilentTransport);
        conn.close().await;

        let probe = LivenessProbe::new(&conn);
        let err = probe.check(Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(
            err,
            LivenessError::Rejected(RequestError::ConnectionClosed)
        ));
    }
}
