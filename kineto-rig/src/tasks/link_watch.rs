//! Link heartbeat watchdog
//!
//! Logs when the remote goes quiet and when it comes back. A lost link does
//! not stop the rig.

use defmt::*;
use embassy_time::{Duration, Ticker};

use kineto_core::link::{LinkMonitor, LinkStatus, LINK_TIMEOUT_MS};

use crate::channels::HEARTBEAT_RECEIVED;

/// Watchdog interval in milliseconds
const WATCH_INTERVAL_MS: u32 = 100;

#[embassy_executor::task]
pub async fn link_watch_task() {
    info!("Link watch task started");

    let mut monitor = LinkMonitor::default();
    let mut ticker = Ticker::every(Duration::from_millis(WATCH_INTERVAL_MS as u64));

    loop {
        ticker.next().await;

        let mut change = None;
        if HEARTBEAT_RECEIVED.try_take().is_some() {
            change = monitor.frame_received();
        }
        change = change.or(monitor.tick(WATCH_INTERVAL_MS));

        match change {
            Some(LinkStatus::Up) => info!("Remote link up"),
            Some(LinkStatus::Lost) => {
                warn!("Remote link lost: no frame for {} ms", LINK_TIMEOUT_MS)
            }
            None => {}
        }
    }
}
