//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, known log levels)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function over `SessionConfig`
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::SessionConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The probe deadline would expire immediately.
    #[error("liveness.probe_timeout_secs must be positive")]
    ZeroProbeTimeout,

    /// Keepalive enabled with a zero idle time.
    #[error("keep_alive.idle_secs must be positive when keepalive is enabled")]
    ZeroKeepAliveIdle,

    /// Keepalive enabled with a zero probe interval.
    #[error("keep_alive.interval_secs must be positive when keepalive is enabled")]
    ZeroKeepAliveInterval,

    /// Log level is not one the subscriber understands.
    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &SessionConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.liveness.probe_timeout_secs == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }

    if config.keep_alive.enabled {
        if config.keep_alive.idle_secs == 0 {
            errors.push(ValidationError::ZeroKeepAliveIdle);
        }
        if config.keep_alive.interval_secs == 0 {
            errors.push(ValidationError::ZeroKeepAliveInterval);
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
