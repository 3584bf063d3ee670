//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod link_rx;
pub mod link_watch;
pub mod sequencer;

pub use link_rx::link_rx_task;
pub use link_watch::link_watch_task;
pub use sequencer::sequencer_task;
