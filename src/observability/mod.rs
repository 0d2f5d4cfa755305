//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (probe outcome counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//!     → Whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing with per-probe correlation IDs
//! - Metrics go through the `metrics` facade; this crate installs no
//!   recorder or exporter, that belongs to the caller

pub mod logging;
pub mod metrics;
