//! Liveness detection subsystem.
//!
//! # Data Flow
//! ```text
//! Application-level probe (probe.rs):
//!     check(timeout)
//!     → keepalive request + deadline, both on the connection's context
//!     → first event wins, loser swallowed
//!     → outcome handed back to the caller
//!
//! Kernel keepalive (socket.rs):
//!     enable()
//!     → transport sets SO_KEEPALIVE once at session setup
//! ```
//!
//! # State Machine
//! ```text
//! Pending → Acknowledged: ack arrives while still pending
//! Pending → Rejected:     peer or transport fails the request
//! Pending → TimedOut:     deadline fires first
//! ```
//! All terminal states are absorbing; reaching one always releases the
//! deadline timer.
//!
//! # Design Decisions
//! - The deadline lives on the connection's own context, never on the
//!   caller's: a caller-side timeout would stop the waiting but leave the
//!   request and its timer pending inside a wedged connection forever
//! - No retries; one timeout or failure is reported once and the caller
//!   decides what to do with the connection
//! - Overlapping probes are independent races with independent timers

pub mod probe;
pub mod socket;
pub mod types;

pub use probe::LivenessProbe;
pub use socket::SocketKeepAlive;
pub use types::{LivenessError, LivenessResult};
