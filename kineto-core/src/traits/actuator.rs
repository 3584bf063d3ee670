//! Actuator driver trait
//!
//! The rig drives two hobby servos open-loop: the driver is told where to
//! go and nothing reports back whether the servo got there.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Servo output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Channel {
    /// Arm servo
    Primary,
    /// Tip servo
    Secondary,
}

impl Channel {
    /// Both channels, primary first
    pub const ALL: [Channel; 2] = [Channel::Primary, Channel::Secondary];

    /// Index into per-channel arrays
    pub const fn index(self) -> usize {
        match self {
            Channel::Primary => 0,
            Channel::Secondary => 1,
        }
    }
}

/// Trait for servo output drivers
///
/// Calls are assumed to succeed. A driver that can fail (for example a
/// PWM peripheral returning an error) swallows the failure.
pub trait ActuatorDriver {
    /// Command a channel to a pulse width in microseconds
    fn set_position(&mut self, channel: Channel, pulse_us: u16);

    /// Start emitting pulses on a channel
    fn enable(&mut self, channel: Channel);

    /// Stop emitting pulses on a channel (servo goes limp)
    fn disable(&mut self, channel: Channel);
}

impl<T: ActuatorDriver + ?Sized> ActuatorDriver for &mut T {
    fn set_position(&mut self, channel: Channel, pulse_us: u16) {
        (**self).set_position(channel, pulse_us)
    }

    fn enable(&mut self, channel: Channel) {
        (**self).enable(channel)
    }

    fn disable(&mut self, channel: Channel) {
        (**self).disable(channel)
    }
}
