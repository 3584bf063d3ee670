//! Link health tracking
//!
//! The remote pings once a second. The rig only reports a lost link; it
//! keeps running whatever it was told to do.

/// Interval between remote heartbeats (ms)
pub const HEARTBEAT_MS: u32 = 1000;

/// Silence after which the link counts as lost (ms)
pub const LINK_TIMEOUT_MS: u32 = 3000;

/// Link state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Frames are arriving again
    Up,
    /// No frame within the timeout
    Lost,
}

/// Heartbeat timeout tracker
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    timeout_ms: u32,
    /// Time since the last frame (ms)
    silent_ms: u32,
    /// A frame has been seen since boot
    seen: bool,
    lost: bool,
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new(LINK_TIMEOUT_MS)
    }
}

impl LinkMonitor {
    /// Create a monitor with the given timeout
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            silent_ms: 0,
            seen: false,
            lost: false,
        }
    }

    /// Record any valid frame from the remote
    ///
    /// Returns [`LinkStatus::Up`] on the first frame and on the first frame
    /// after a loss.
    pub fn frame_received(&mut self) -> Option<LinkStatus> {
        self.silent_ms = 0;
        let change = (!self.seen || self.lost).then_some(LinkStatus::Up);
        self.seen = true;
        self.lost = false;
        change
    }

    /// Advance time
    ///
    /// Returns [`LinkStatus::Lost`] once when the timeout is crossed.
    pub fn tick(&mut self, delta_ms: u32) -> Option<LinkStatus> {
        self.silent_ms = self.silent_ms.saturating_add(delta_ms);
        if self.lost || self.silent_ms < self.timeout_ms {
            return None;
        }
        self.lost = true;
        Some(LinkStatus::Lost)
    }

    /// Link is currently considered up
    pub fn is_up(&self) -> bool {
        self.seen && !self.lost
    }
}
