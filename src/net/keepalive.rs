//! Kernel TCP keepalive configuration.
//!
//! # Responsibilities
//! - Apply `SO_KEEPALIVE` and its timing knobs to a live TCP stream
//!
//! # Design Decisions
//! - Uses socket2's `SockRef`, which borrows the fd without taking the
//!   stream out of Tokio
//! - Interval and retry knobs are platform-gated; the base option applies
//!   everywhere

use std::io;
use std::time::Duration;

use socket2::{SockRef, TcpKeepalive};
use tokio::net::TcpStream;

use crate::config::schema::KeepAliveConfig;

/// Enable kernel keepalive probing on `stream` with the configured timing.
pub fn configure_tcp_keepalive(stream: &TcpStream, config: &KeepAliveConfig) -> io::Result<()> {
    let socket = SockRef::from(stream);

    let mut params = TcpKeepalive::new().with_time(Duration::from_secs(config.idle_secs));
    #[cfg(any(unix, target_os = "windows"))]
    {
        params = params.with_interval(Duration::from_secs(config.interval_secs));
    }
    #[cfg(unix)]
    {
        params = params.with_retries(config.retries);
    }

    socket.set_keepalive(true)?;
    socket.set_tcp_keepalive(&params)
}
