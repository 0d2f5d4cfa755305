//! Configuration schema definitions.
//!
//! This module defines the configuration structure for a monitored session.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for a liveness-monitored session.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Application-level liveness probe settings.
    pub liveness: LivenessConfig,

    /// Kernel-level TCP keepalive settings.
    pub keep_alive: KeepAliveConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Liveness probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LivenessConfig {
    /// Probe timeout in seconds. A probe with no acknowledgment or
    /// rejection within this window reports the connection as dead.
    pub probe_timeout_secs: u64,
}

impl LivenessConfig {
    /// Probe timeout as a `Duration`.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 10,
        }
    }
}

/// Kernel TCP keepalive configuration.
///
/// These map onto the socket-level knobs (`SO_KEEPALIVE`,
/// `TCP_KEEPIDLE`, `TCP_KEEPINTVL`, `TCP_KEEPCNT`) and act as a
/// defense-in-depth layer underneath the application-level probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeepAliveConfig {
    /// Enable kernel keepalive probing on the session socket.
    pub enabled: bool,

    /// Idle time in seconds before the kernel starts probing.
    pub idle_secs: u64,

    /// Interval in seconds between kernel probes.
    pub interval_secs: u64,

    /// Number of unacknowledged kernel probes before the connection drops.
    pub retries: u32,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            idle_secs: 60,
            interval_secs: 10,
            retries: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
