//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod edge;
pub mod gesture;
pub mod link_tx;

pub use edge::edge_task;
pub use gesture::gesture_task;
pub use link_tx::link_tx_task;

use embassy_time::Instant;
use kineto_core::time::Tick;

/// Current time on the gesture time base (1 tick = 1 ms)
pub fn now() -> Tick {
    Tick::new(Instant::now().as_millis() as u32)
}
