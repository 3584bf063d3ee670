//! Cooperative motion execution
//!
//! Runs one plan at a time on an [`ActuatorDriver`], sleeping between
//! steps on an async [`DelayNs`]. Before every checkpoint step the running
//! plan polls a [`PreemptionSource`]; a pending home request aborts the
//! plan and the rig is driven home instead.

use embedded_hal_async::delay::DelayNs;
use kineto_protocol::Command;

use super::plan::{home_plan, plan_for, Step};
use super::state::{select_motion, Motion, Pose, SequencerState};
use crate::config::{MotionTiming, ServoCalibration};
use crate::traits::{ActuatorDriver, Channel, CommandSource, NeverPreempt, PreemptionSource};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// The motion ran to its last step
    Completed(Motion),
    /// A home request aborted the motion at a checkpoint; the rig went home
    Preempted(Motion),
}

impl Outcome {
    /// Motion the command selected
    pub fn motion(&self) -> Motion {
        match self {
            Outcome::Completed(m) | Outcome::Preempted(m) => *m,
        }
    }
}

/// Motion sequencer
///
/// Sole owner of the servo driver and of [`SequencerState`].
pub struct MotionSequencer<A, D> {
    driver: A,
    delay: D,
    calibration: ServoCalibration,
    timing: MotionTiming,
    state: SequencerState,
    /// Output enabled, per channel
    enabled: [bool; 2],
}

impl<A: ActuatorDriver, D: DelayNs> MotionSequencer<A, D> {
    /// Create a sequencer; outputs start disabled and the pose is unknown
    pub fn new(driver: A, delay: D, calibration: ServoCalibration, timing: MotionTiming) -> Self {
        Self {
            driver,
            delay,
            calibration,
            timing,
            state: SequencerState::new(),
            enabled: [false; 2],
        }
    }

    /// Current state
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Last commanded pose
    pub fn pose(&self) -> Pose {
        self.state.pose
    }

    /// A run is in progress
    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    /// Servo driver
    pub fn driver(&self) -> &A {
        &self.driver
    }

    /// Settle delay source
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Take the next command from `source` and run it
    ///
    /// A home request still pending from the previous run goes ahead of
    /// anything queued. Motions without checkpoints never consume the
    /// interrupt, so a home raised during one is served here.
    pub async fn serve<S>(&mut self, source: &mut S) -> (Command, Outcome)
    where
        S: CommandSource + ?Sized,
    {
        let command = if source.take_home_request() {
            Command::Home
        } else {
            source.next_command().await
        };
        let outcome = self.run(command, source).await;
        (command, outcome)
    }

    /// Execute the motion `command` selects in the current pose
    ///
    /// Returns once the motion has completed, or once a home request taken
    /// at a checkpoint has driven the rig home.
    pub async fn run<P>(&mut self, command: Command, preempt: &mut P) -> Outcome
    where
        P: PreemptionSource + ?Sized,
    {
        let from = self.state.pose;
        let motion = select_motion(from, command);
        let plan = plan_for(motion, &self.calibration, &self.timing);

        self.state.busy = true;
        self.state.pose = motion.running_pose(from);

        let outcome = if self.execute(&plan, preempt).await {
            self.state.pose = motion.final_pose(from);
            if self.state.pose == Pose::Home {
                self.release_at_rest();
            }
            Outcome::Completed(motion)
        } else {
            self.go_home().await;
            Outcome::Preempted(motion)
        };

        self.state.busy = false;
        outcome
    }

    /// Walk a plan; `false` if a home request was taken at a checkpoint
    async fn execute<P>(&mut self, plan: &[Step], preempt: &mut P) -> bool
    where
        P: PreemptionSource + ?Sized,
    {
        for step in plan {
            if step.checkpoint && preempt.take_home_request() {
                return false;
            }
            self.move_to(step.channel, step.pulse_us);
            if step.settle_ms > 0 {
                self.delay.delay_ms(u32::from(step.settle_ms)).await;
            }
        }
        true
    }

    /// The home effect, run after a preempted motion
    async fn go_home(&mut self) {
        let plan = home_plan(&self.calibration, &self.timing);
        self.execute(&plan, &mut NeverPreempt).await;
        self.state.pose = Pose::Home;
        self.release_at_rest();
    }

    fn move_to(&mut self, channel: Channel, pulse_us: u16) {
        // Position first so the output never starts on a stale pulse
        self.driver.set_position(channel, pulse_us);
        if !self.enabled[channel.index()] {
            self.driver.enable(channel);
            self.enabled[channel.index()] = true;
        }
    }

    fn release_at_rest(&mut self) {
        if !self.timing.release_at_rest {
            return;
        }
        for channel in Channel::ALL {
            self.driver.disable(channel);
            self.enabled[channel.index()] = false;
        }
    }
}
