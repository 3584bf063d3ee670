//! Sequencer pose tracking and motion selection
//!
//! Which motion a command starts depends on where the rig currently is.

use kineto_protocol::Command;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Last known pose of the rig
///
/// Open loop: this is the pose the last completed sequence commanded,
/// not a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pose {
    /// Nothing commanded since power-on
    #[default]
    Unknown,
    /// Both servos at rest
    Home,
    /// Arm raised by the slow ramp
    RaisedSlow,
    /// Arm raised in one jump
    RaisedFast,
    /// Tremor sequence running
    Tremoring,
}

impl Pose {
    /// Arm is up (either raise)
    pub fn is_raised(&self) -> bool {
        matches!(self, Pose::RaisedSlow | Pose::RaisedFast)
    }
}

/// Named motion sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Motion {
    /// Both servos to rest
    Home,
    /// Ramp the arm up step by step
    RaiseSlow,
    /// Jump the arm up
    RaiseFast,
    /// Flick the tip up, down and up again
    FlipTip,
    /// Shake both servos, then return home
    Tremor,
}

impl Motion {
    /// Pose held while this motion runs
    pub fn running_pose(self, from: Pose) -> Pose {
        match self {
            Motion::Tremor => Pose::Tremoring,
            _ => from,
        }
    }

    /// Pose once this motion has completed
    pub fn final_pose(self, from: Pose) -> Pose {
        match self {
            Motion::Home | Motion::Tremor => Pose::Home,
            Motion::RaiseSlow => Pose::RaisedSlow,
            Motion::RaiseFast => Pose::RaisedFast,
            Motion::FlipTip => from,
        }
    }
}

/// Pick the motion a command starts from the given pose
///
/// `RaiseSlow` is overloaded: once the arm is up it flips the tip instead
/// of raising again.
pub fn select_motion(pose: Pose, command: Command) -> Motion {
    use Command::*;

    match (command, pose) {
        (Home, _) => Motion::Home,
        (RaiseSlow, Pose::RaisedSlow | Pose::RaisedFast) => Motion::FlipTip,
        (RaiseSlow, _) => Motion::RaiseSlow,
        (RaiseFast, _) => Motion::RaiseFast,
        (Tremor, _) => Motion::Tremor,
    }
}

/// State owned by the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequencerState {
    /// Last commanded pose
    pub pose: Pose,
    /// A sequence is running
    pub busy: bool,
}

impl SequencerState {
    /// Power-on state
    pub const fn new() -> Self {
        Self {
            pose: Pose::Unknown,
            busy: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSES: [Pose; 5] = [
        Pose::Unknown,
        Pose::Home,
        Pose::RaisedSlow,
        Pose::RaisedFast,
        Pose::Tremoring,
    ];

    #[test]
    fn test_home_from_any_pose() {
        for pose in POSES {
            let motion = select_motion(pose, Command::Home);
            assert_eq!(motion, Motion::Home);
            assert_eq!(motion.final_pose(pose), Pose::Home);
        }
    }

    #[test]
    fn test_raise_slow_overloading() {
        assert_eq!(select_motion(Pose::Home, Command::RaiseSlow), Motion::RaiseSlow);
        assert_eq!(select_motion(Pose::Unknown, Command::RaiseSlow), Motion::RaiseSlow);
        assert_eq!(select_motion(Pose::RaisedSlow, Command::RaiseSlow), Motion::FlipTip);
        assert_eq!(select_motion(Pose::RaisedFast, Command::RaiseSlow), Motion::FlipTip);
    }

    #[test]
    fn test_flip_keeps_pose() {
        assert_eq!(Motion::FlipTip.final_pose(Pose::RaisedFast), Pose::RaisedFast);
        assert_eq!(Motion::FlipTip.final_pose(Pose::RaisedSlow), Pose::RaisedSlow);
    }

    #[test]
    fn test_tremor_passes_through_tremoring() {
        let motion = select_motion(Pose::RaisedSlow, Command::Tremor);
        assert_eq!(motion, Motion::Tremor);
        assert_eq!(motion.running_pose(Pose::RaisedSlow), Pose::Tremoring);
        assert_eq!(motion.final_pose(Pose::Tremoring), Pose::Home);
    }

    #[test]
    fn test_raise_fast_from_anywhere() {
        for pose in POSES {
            assert_eq!(select_motion(pose, Command::RaiseFast), Motion::RaiseFast);
        }
        assert!(Pose::RaisedFast.is_raised());
        assert!(!Pose::Tremoring.is_raised());
    }
}
