//! Probe outcome and error definitions.

use std::time::Duration;

use thiserror::Error;

use crate::session::transport::RequestError;

/// Errors produced by a single liveness check.
///
/// Every check resolves exactly once: acknowledgment (`Ok`) or one of
/// these. None is fatal to the process; the usual caller response is to
/// close and re-establish the connection.
#[derive(Debug, Error)]
pub enum LivenessError {
    /// No acknowledgment or rejection arrived within the deadline. The
    /// connection is suspected dead; tearing it down is the caller's call.
    #[error("liveness probe timed out after {after:?}")]
    TimedOut {
        /// The deadline the probe raced against.
        after: Duration,
    },

    /// The peer or transport explicitly failed the request; the cause is
    /// passed through unmodified.
    #[error("liveness probe rejected: {0}")]
    Rejected(#[source] RequestError),
}

/// Result type for liveness operations.
pub type LivenessResult<T> = Result<T, LivenessError>;
