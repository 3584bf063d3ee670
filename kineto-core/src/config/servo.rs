//! Servo pulse-width calibration
//!
//! Positions are hobby-servo pulse widths in microseconds. Which end is
//! "rest" and which is "raised" depends on how the horn is mounted, so the
//! primary arm counts down while raising and the tip counts up.

use crate::traits::Channel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rest and raised pulse widths for one servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelCalibration {
    /// Pulse width at the home pose (µs)
    pub rest_us: u16,
    /// Pulse width when raised (µs)
    pub raised_us: u16,
    /// Pulse width at the far end of a tremor pulse (µs)
    pub tremor_us: u16,
}

impl ChannelCalibration {
    /// Create a calibration entry
    pub const fn new(rest_us: u16, raised_us: u16, tremor_us: u16) -> Self {
        Self {
            rest_us,
            raised_us,
            tremor_us,
        }
    }
}

/// Calibration for both servos of the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoCalibration {
    /// Arm servo
    pub primary: ChannelCalibration,
    /// Tip servo
    pub secondary: ChannelCalibration,
    /// Tip positions visited by the flip, in order (µs)
    pub flip_pulses_us: [u16; 3],
}

impl ServoCalibration {
    /// Factory calibration of the reference rig
    pub const DEFAULT: Self = Self {
        primary: ChannelCalibration::new(2150, 986, 1900),
        secondary: ChannelCalibration::new(550, 1455, 800),
        flip_pulses_us: [1200, 600, 1455],
    };

    /// Calibration for one channel
    pub const fn channel(&self, channel: Channel) -> &ChannelCalibration {
        match channel {
            Channel::Primary => &self.primary,
            Channel::Secondary => &self.secondary,
        }
    }
}

impl Default for ServoCalibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_calibration() {
        let cal = ServoCalibration::default();
        assert_eq!(cal.channel(Channel::Primary).rest_us, 2150);
        assert_eq!(cal.channel(Channel::Primary).raised_us, 986);
        assert_eq!(cal.channel(Channel::Secondary).rest_us, 550);
        assert_eq!(cal.channel(Channel::Secondary).raised_us, 1455);
    }
}
