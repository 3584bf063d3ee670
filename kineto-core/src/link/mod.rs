//! Remote link supervision

pub mod monitor;

pub use monitor::{LinkMonitor, LinkStatus, HEARTBEAT_MS, LINK_TIMEOUT_MS};
