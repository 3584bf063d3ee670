//! Motion sequencer task
//!
//! Sole owner of the servos. Runs one command at a time; a home request
//! raised while a motion runs is picked up at its next checkpoint.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::pwm::PwmOutput;
use embassy_time::Delay;

use kineto_core::sequencer::{MotionSequencer, Outcome};
use kineto_core::traits::{CommandSource, PreemptionSource};
use kineto_drivers::servo::PwmServos;
use kineto_protocol::Command;

use crate::channels::{COMMANDS, HOME_INTERRUPT, SEQUENCER_BUSY};
use crate::config::{MOTION_TIMING, SERVO_CALIBRATION};

type RigServos = PwmServos<PwmOutput<'static>, PwmOutput<'static>>;

/// Command queue and home interrupt as seen by the sequencer
///
/// Marks the sequencer busy as soon as it hands out work, so the router
/// sends later home commands to the interrupt slot.
struct RigCommands;

impl PreemptionSource for RigCommands {
    fn take_home_request(&mut self) -> bool {
        let taken = HOME_INTERRUPT.try_take().is_some();
        if taken {
            SEQUENCER_BUSY.store(true, Ordering::Release);
        }
        taken
    }
}

impl CommandSource for RigCommands {
    async fn next_command(&mut self) -> Command {
        let command = match select(HOME_INTERRUPT.wait(), COMMANDS.receive()).await {
            Either::First(()) => Command::Home,
            Either::Second(command) => command,
        };
        SEQUENCER_BUSY.store(true, Ordering::Release);
        command
    }
}

#[embassy_executor::task]
pub async fn sequencer_task(servos: RigServos) {
    info!("Sequencer task started");

    let mut sequencer = MotionSequencer::new(servos, Delay, SERVO_CALIBRATION, MOTION_TIMING);
    let mut commands = RigCommands;

    loop {
        let (command, outcome) = sequencer.serve(&mut commands).await;
        SEQUENCER_BUSY.store(false, Ordering::Release);

        match outcome {
            Outcome::Completed(motion) => {
                debug!("{:?} complete, pose {:?}", motion, sequencer.pose());
            }
            Outcome::Preempted(motion) => {
                info!("{:?} ({:?}) interrupted by home", motion, command);
            }
        }
    }
}
