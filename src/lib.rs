//! Connection Liveness Detection for Persistent Client Sessions

pub mod config;
pub mod event_loop;
pub mod liveness;
pub mod net;
pub mod observability;
pub mod session;

pub use config::schema::SessionConfig;
pub use liveness::probe::LivenessProbe;
pub use session::connection::Connection;
