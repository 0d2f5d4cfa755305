//! Metrics collection.
//!
//! # Metrics
//! - `session_liveness_probes_total` (counter): probes by terminal outcome
//!   (`acknowledged`, `timed_out`, `rejected`)
//! - `session_keepalive_configured_total` (counter): kernel keepalive
//!   attempts by result
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; a no-op unless the embedding
//!   application installs a recorder
//! - Low-overhead updates (atomic increments in the recorder)

use metrics::counter;

/// Record the terminal outcome of a liveness probe.
pub fn record_probe_outcome(outcome: &'static str) {
    counter!("session_liveness_probes_total", "outcome" => outcome).increment(1);
}

/// Record a kernel keepalive configuration attempt.
pub fn record_keepalive_configured(success: bool) {
    let result = if success { "ok" } else { "rejected" };
    counter!("session_keepalive_configured_total", "result" => result).increment(1);
}
