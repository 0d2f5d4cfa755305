//! Serialized execution context subsystem.
//!
//! # Data Flow
//! ```text
//! Caller (any task)
//!     → context.rs (enqueue closure onto the owner task)
//!     → closures drained strictly one at a time
//!     → result handed back over a oneshot channel
//!
//! Deferred work:
//!     timer.rs (sleep off-context)
//!     → callback enqueued onto the same context at the deadline
//! ```
//!
//! # Design Decisions
//! - One consumer task per context; serialization by construction, no locks
//! - The owned state never leaves the consumer task
//! - Timer callbacks observe the same serialization as every other closure
//! - Cancelling a timer prevents a not-yet-fired callback from ever running

pub mod context;
pub mod timer;

pub use context::{EventLoop, Handle, LoopClosed};
pub use timer::TimerHandle;
