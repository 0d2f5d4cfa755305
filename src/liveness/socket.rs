//! Kernel-level socket keepalive as defense in depth.
//!
//! # Responsibilities
//! - Ask the connection's transport to enable kernel keepalive probing
//!
//! # Design Decisions
//! - Stateless and best-effort: enabling twice is as good as once
//! - Independent of the application-level probe; the kernel notices dead
//!   peers at the transport level, the probe at the protocol level

use crate::observability::metrics;
use crate::session::connection::Connection;
use crate::session::transport::TransportError;

/// Stateless configurator for the kernel keepalive socket option.
pub struct SocketKeepAlive;

impl SocketKeepAlive {
    /// Enable kernel keepalive probing on `connection`'s socket.
    ///
    /// Runs on the connection's execution context. Fails when the
    /// transport rejects the option (e.g. the socket is already closed)
    /// or the connection has shut down.
    pub async fn enable(connection: &Connection) -> Result<(), TransportError> {
        let result = connection
            .handle()
            .enqueue(|core| core.set_keep_alive(true))
            .await
            .map_err(|_| TransportError::Closed)?;

        match &result {
            Ok(()) => {
                tracing::debug!(connection_id = %connection.id(), "kernel keepalive enabled");
                metrics::record_keepalive_configured(true);
            }
            Err(error) => {
                tracing::warn!(
                    connection_id = %connection.id(),
                    error = %error,
                    "kernel keepalive rejected"
                );
                metrics::record_keepalive_configured(false);
            }
        }

        result
    }
}
