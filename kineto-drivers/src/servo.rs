//! Hobby servos on PWM outputs
//!
//! A hobby servo reads the high time of a 50 Hz pulse train: roughly
//! 500 µs at one end of travel, 2500 µs at the other. This driver converts
//! pulse widths to duty cycles for any `embedded-hal` PWM channel.
//!
//! # Usage
//!
//! ```ignore
//! let mut servos = PwmServos::new(pwm_a, pwm_b);
//! servos.set_position(Channel::Primary, 1500);
//! servos.enable(Channel::Primary);
//! ```

use embedded_hal::pwm::SetDutyCycle;
use kineto_core::traits::{ActuatorDriver, Channel};

/// Default PWM frame period (µs), 50 Hz
pub const DEFAULT_PERIOD_US: u32 = 20_000;

/// Duty cycle for a pulse width on a channel with the given resolution
///
/// Saturates at `max_duty` for pulses longer than the frame.
pub fn pulse_to_duty(pulse_us: u16, period_us: u32, max_duty: u16) -> u16 {
    if period_us == 0 {
        return 0;
    }
    let duty = u64::from(pulse_us) * u64::from(max_duty) / u64::from(period_us);
    duty.min(u64::from(max_duty)) as u16
}

#[derive(Debug, Clone, Copy, Default)]
struct Output {
    /// Last commanded pulse (µs)
    pulse_us: Option<u16>,
    enabled: bool,
}

/// Two hobby servos driven open-loop from PWM channels
///
/// PWM errors are discarded: nothing reports back whether a servo moved,
/// so a failed write looks the same as a stalled servo.
pub struct PwmServos<P, S> {
    primary: P,
    secondary: S,
    period_us: u32,
    outputs: [Output; 2],
}

impl<P: SetDutyCycle, S: SetDutyCycle> PwmServos<P, S> {
    /// Create a driver for PWM channels running at 50 Hz
    ///
    /// Both outputs start off.
    pub fn new(primary: P, secondary: S) -> Self {
        Self::with_period(primary, secondary, DEFAULT_PERIOD_US)
    }

    /// Create a driver for PWM channels with a different frame period
    pub fn with_period(mut primary: P, mut secondary: S, period_us: u32) -> Self {
        let _ = primary.set_duty_cycle_fully_off();
        let _ = secondary.set_duty_cycle_fully_off();
        Self {
            primary,
            secondary,
            period_us,
            outputs: [Output::default(); 2],
        }
    }

    /// Last commanded pulse on a channel
    pub fn pulse_us(&self, channel: Channel) -> Option<u16> {
        self.outputs[channel.index()].pulse_us
    }

    /// Output on a channel is emitting pulses
    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.outputs[channel.index()].enabled
    }

    /// Release the PWM channels
    pub fn release(self) -> (P, S) {
        (self.primary, self.secondary)
    }

    /// Push the channel's current state to its PWM output
    fn apply(&mut self, channel: Channel) {
        let output = self.outputs[channel.index()];
        let pulse = output.pulse_us.filter(|_| output.enabled);
        match channel {
            Channel::Primary => drive(&mut self.primary, pulse, self.period_us),
            Channel::Secondary => drive(&mut self.secondary, pulse, self.period_us),
        }
    }
}

fn drive<T: SetDutyCycle>(pwm: &mut T, pulse_us: Option<u16>, period_us: u32) {
    let _ = match pulse_us {
        Some(pulse) => {
            let duty = pulse_to_duty(pulse, period_us, pwm.max_duty_cycle());
            pwm.set_duty_cycle(duty)
        }
        None => pwm.set_duty_cycle_fully_off(),
    };
}

impl<P: SetDutyCycle, S: SetDutyCycle> ActuatorDriver for PwmServos<P, S> {
    fn set_position(&mut self, channel: Channel, pulse_us: u16) {
        self.outputs[channel.index()].pulse_us = Some(pulse_us);
        if self.outputs[channel.index()].enabled {
            self.apply(channel);
        }
    }

    fn enable(&mut self, channel: Channel) {
        self.outputs[channel.index()].enabled = true;
        self.apply(channel);
    }

    fn disable(&mut self, channel: Channel) {
        self.outputs[channel.index()].enabled = false;
        self.apply(channel);
    }
}
