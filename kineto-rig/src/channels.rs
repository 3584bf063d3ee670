//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

use kineto_protocol::Command;

/// Channel capacity for queued commands
const COMMAND_QUEUE_SIZE: usize = 8;

/// Commands waiting for the sequencer, in arrival order
pub static COMMANDS: Channel<CriticalSectionRawMutex, Command, COMMAND_QUEUE_SIZE> =
    Channel::new();

/// Pending home request for the running sequence
///
/// Single slot: any number of home commands received during one sequence
/// collapse into one request.
pub static HOME_INTERRUPT: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that a valid frame was received from the remote
pub static HEARTBEAT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Sequencer is running a motion
///
/// Written by the sequencer task only; read by the command router.
pub static SEQUENCER_BUSY: AtomicBool = AtomicBool::new(false);
