//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries and tests
//! - Respect `RUST_LOG` when set, the configured level otherwise
//!
//! # Design Decisions
//! - Library code only emits events; installing the subscriber is an
//!   application decision, so `init` is opt-in and idempotent-by-failure

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::schema::ObservabilityConfig;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this
/// twice leaves the first subscriber in place.
pub fn init(config: &ObservabilityConfig) {
    let fallback = format!("session_liveness={}", config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback.into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
