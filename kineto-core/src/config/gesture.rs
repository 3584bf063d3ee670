//! Press classification thresholds

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Presses this short or shorter are contact chatter
pub const NOISE_FLOOR_TICKS: u32 = 10;

/// Presses this long or longer are long presses
pub const SHORT_LONG_BOUNDARY_TICKS: u32 = 500;

/// Window, from the first short press, in which further short presses
/// cluster into one gesture
pub const BURST_WINDOW_TICKS: u32 = 1000;

/// Largest burst that still counts as intentional input
pub const MAX_BURST_PRESSES: u8 = 3;

/// Gesture classifier thresholds, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureTiming {
    /// Upper bound (inclusive) of a chatter press
    pub noise_floor_ticks: u32,
    /// Lower bound (inclusive) of a long press
    pub short_long_boundary_ticks: u32,
    /// Burst clustering window
    pub burst_window_ticks: u32,
    /// Bursts with more presses than this are discarded as noise
    pub max_burst_presses: u8,
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self {
            noise_floor_ticks: NOISE_FLOOR_TICKS,
            short_long_boundary_ticks: SHORT_LONG_BOUNDARY_TICKS,
            burst_window_ticks: BURST_WINDOW_TICKS,
            max_burst_presses: MAX_BURST_PRESSES,
        }
    }
}
