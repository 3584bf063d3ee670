//! Motion plans generated from calibration
//!
//! A plan is the flat list of timed servo moves a motion expands to. The
//! executor walks it front to back; nothing in a plan refers back to the
//! calibration, so changing `rig.toml` never touches sequencing.

use heapless::Vec;

use super::state::Motion;
use crate::config::{MotionTiming, ServoCalibration};
use crate::traits::Channel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum steps in any plan
pub const MAX_PLAN_STEPS: usize = 256;

/// Maximum steps in the slow-raise ramp
pub const MAX_RAMP_STEPS: usize = 240;

/// Steps in one tremor block
const TREMOR_BLOCK_STEPS: usize = 4;

/// Steps in the home effect
const HOME_STEPS: usize = 2;

/// A single timed servo move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// Servo to move
    pub channel: Channel,
    /// Target pulse width (µs)
    pub pulse_us: u16,
    /// Wait after the move (ms)
    pub settle_ms: u16,
    /// Poll for a pending home request before this step
    pub checkpoint: bool,
}

impl Step {
    /// Move without a checkpoint
    pub const fn new(channel: Channel, pulse_us: u16, settle_ms: u16) -> Self {
        Self {
            channel,
            pulse_us,
            settle_ms,
            checkpoint: false,
        }
    }

    /// Same move, preceded by a checkpoint
    pub const fn with_checkpoint(self) -> Self {
        Self {
            checkpoint: true,
            ..self
        }
    }
}

/// Expanded motion
pub type Plan = Vec<Step, MAX_PLAN_STEPS>;

/// Expand a motion into its plan
pub fn plan_for(motion: Motion, cal: &ServoCalibration, timing: &MotionTiming) -> Plan {
    match motion {
        Motion::Home => home_plan(cal, timing),
        Motion::RaiseSlow => raise_slow_plan(cal, timing),
        Motion::RaiseFast => raise_fast_plan(cal, timing),
        Motion::FlipTip => flip_plan(cal, timing),
        Motion::Tremor => tremor_plan(cal, timing),
    }
}

/// Both servos to rest, then settle
pub fn home_plan(cal: &ServoCalibration, timing: &MotionTiming) -> Plan {
    let mut plan = Plan::new();
    push_home(&mut plan, cal, timing);
    plan
}

fn push_home(plan: &mut Plan, cal: &ServoCalibration, timing: &MotionTiming) {
    let _ = plan.push(Step::new(Channel::Primary, cal.primary.rest_us, 0));
    let _ = plan.push(Step::new(
        Channel::Secondary,
        cal.secondary.rest_us,
        timing.home_settle_ms,
    ));
}

/// Ramp increment actually used for a move of `distance_us`
///
/// The configured increment is widened when the ramp would otherwise need
/// more than [`MAX_RAMP_STEPS`] steps.
pub fn ramp_increment(distance_us: u16, configured_us: u16) -> u16 {
    let minimum = distance_us.div_ceil(MAX_RAMP_STEPS as u16);
    configured_us.max(minimum).max(1)
}

/// Arm from rest to raised in small steps, each a checkpoint
pub fn raise_slow_plan(cal: &ServoCalibration, timing: &MotionTiming) -> Plan {
    let mut plan = Plan::new();
    let from = cal.primary.rest_us;
    let to = cal.primary.raised_us;
    let increment = ramp_increment(from.abs_diff(to), timing.ramp_step_us);

    let mut pulse = from;
    loop {
        pulse = if from > to {
            pulse.saturating_sub(increment).max(to)
        } else {
            pulse.saturating_add(increment).min(to)
        };
        let step = Step::new(Channel::Primary, pulse, timing.ramp_step_ms).with_checkpoint();
        if plan.push(step).is_err() || pulse == to {
            break;
        }
    }

    plan
}

/// Arm straight to raised
pub fn raise_fast_plan(cal: &ServoCalibration, timing: &MotionTiming) -> Plan {
    let mut plan = Plan::new();
    let _ = plan.push(Step::new(
        Channel::Primary,
        cal.primary.raised_us,
        timing.fast_settle_ms,
    ));
    plan
}

/// Tip through the flip positions
pub fn flip_plan(cal: &ServoCalibration, timing: &MotionTiming) -> Plan {
    let mut plan = Plan::new();
    for pulse in cal.flip_pulses_us {
        let _ = plan.push(Step::new(Channel::Secondary, pulse, timing.flip_step_ms));
    }
    plan
}

/// Number of tremor blocks that fit in a plan
pub fn tremor_block_count(timing: &MotionTiming) -> usize {
    let room = (MAX_PLAN_STEPS - 2 * HOME_STEPS) / TREMOR_BLOCK_STEPS;
    usize::from(timing.tremor_blocks).min(room)
}

/// Home, alternating pulses on both servos, home again
pub fn tremor_plan(cal: &ServoCalibration, timing: &MotionTiming) -> Plan {
    let mut plan = Plan::new();
    let pulse_ms = timing.tremor_pulse_ms;

    push_home(&mut plan, cal, timing);
    for _ in 0..tremor_block_count(timing) {
        let block = [
            Step::new(Channel::Primary, cal.primary.tremor_us, pulse_ms).with_checkpoint(),
            Step::new(Channel::Secondary, cal.secondary.tremor_us, pulse_ms),
            Step::new(Channel::Primary, cal.primary.rest_us, pulse_ms),
            Step::new(Channel::Secondary, cal.secondary.rest_us, pulse_ms),
        ];
        for step in block {
            let _ = plan.push(step);
        }
    }
    push_home(&mut plan, cal, timing);

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChannelCalibration;

    fn defaults() -> (ServoCalibration, MotionTiming) {
        (ServoCalibration::default(), MotionTiming::default())
    }

    #[test]
    fn test_home_plan() {
        let (cal, timing) = defaults();
        let plan = home_plan(&cal, &timing);
        assert_eq!(
            plan.as_slice(),
            &[
                Step::new(Channel::Primary, 2150, 0),
                Step::new(Channel::Secondary, 550, 500),
            ]
        );
        assert!(plan.iter().all(|s| !s.checkpoint));
    }

    #[test]
    fn test_raise_slow_ramp() {
        let (cal, timing) = defaults();
        let plan = raise_slow_plan(&cal, &timing);

        // 2150 -> 986 is 1164 µs: 232 full steps of 5 µs and a last short one
        assert_eq!(plan.len(), 233);
        assert_eq!(plan[0].pulse_us, 2145);
        assert_eq!(plan[plan.len() - 1].pulse_us, 986);
        assert!(plan.iter().all(|s| s.checkpoint));
        assert!(plan.iter().all(|s| s.channel == Channel::Primary));
        assert!(plan.iter().all(|s| s.settle_ms == 5));
        assert!(plan.windows(2).all(|w| w[1].pulse_us < w[0].pulse_us));
    }

    #[test]
    fn test_ramp_is_widened_to_fit() {
        let (mut cal, mut timing) = defaults();
        cal.primary = ChannelCalibration::new(500, 2500, 1500);
        timing.ramp_step_us = 1;

        let plan = raise_slow_plan(&cal, &timing);
        assert!(plan.len() <= MAX_RAMP_STEPS);
        assert_eq!(plan[plan.len() - 1].pulse_us, 2500);
        assert!(plan.windows(2).all(|w| w[1].pulse_us > w[0].pulse_us));
    }

    #[test]
    fn test_ramp_without_travel() {
        let (mut cal, timing) = defaults();
        cal.primary = ChannelCalibration::new(1500, 1500, 1500);
        let plan = raise_slow_plan(&cal, &timing);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].pulse_us, 1500);
    }

    #[test]
    fn test_raise_fast_is_one_step() {
        let (cal, timing) = defaults();
        let plan = raise_fast_plan(&cal, &timing);
        assert_eq!(plan.as_slice(), &[Step::new(Channel::Primary, 986, 300)]);
    }

    #[test]
    fn test_flip_moves_tip_only() {
        let (cal, timing) = defaults();
        let plan = flip_plan(&cal, &timing);
        let pulses: heapless::Vec<u16, 3> = plan.iter().map(|s| s.pulse_us).collect();
        assert_eq!(pulses.as_slice(), &[1200, 600, 1455]);
        assert!(plan.iter().all(|s| s.channel == Channel::Secondary));
    }

    #[test]
    fn test_tremor_layout() {
        let (cal, timing) = defaults();
        let plan = tremor_plan(&cal, &timing);

        assert_eq!(plan.len(), 2 + 5 * 4 + 2);
        assert_eq!(plan[..2], home_plan(&cal, &timing)[..]);
        assert_eq!(plan[plan.len() - 2..], home_plan(&cal, &timing)[..]);

        let checkpoints = plan.iter().filter(|s| s.checkpoint).count();
        assert_eq!(checkpoints, 5);
        assert!(plan[2].checkpoint);
        assert_eq!(plan[2].pulse_us, 1900);
        assert_eq!(plan[3].pulse_us, 800);
    }

    #[test]
    fn test_tremor_blocks_are_clamped() {
        let (cal, mut timing) = defaults();
        timing.tremor_blocks = u8::MAX;
        assert_eq!(tremor_block_count(&timing), 63);

        let plan = tremor_plan(&cal, &timing);
        assert_eq!(plan.len(), MAX_PLAN_STEPS);
        assert_eq!(plan[plan.len() - 1].pulse_us, cal.secondary.rest_us);
    }
}
