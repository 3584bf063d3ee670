//! Motion sequence timing

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing parameters for the motion plans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionTiming {
    /// Settle time after driving both servos home (ms)
    pub home_settle_ms: u16,
    /// Disable both outputs once the home pose has settled
    pub release_at_rest: bool,
    /// Pulse-width increment per slow-raise step (µs)
    pub ramp_step_us: u16,
    /// Settle time per slow-raise step (ms)
    pub ramp_step_ms: u16,
    /// Settle time after the fast raise (ms)
    pub fast_settle_ms: u16,
    /// Settle time per tip flip position (ms)
    pub flip_step_ms: u16,
    /// Number of tremor blocks
    pub tremor_blocks: u8,
    /// Settle time per tremor pulse (ms)
    pub tremor_pulse_ms: u16,
}

impl MotionTiming {
    /// Timing of the reference rig
    pub const DEFAULT: Self = Self {
        home_settle_ms: 500,
        release_at_rest: true,
        ramp_step_us: 5,
        ramp_step_ms: 5,
        fast_settle_ms: 300,
        flip_step_ms: 150,
        tremor_blocks: 5,
        tremor_pulse_ms: 80,
    };
}

impl Default for MotionTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}
