//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use kineto_core::input::ButtonTransition;
use kineto_protocol::Command;

/// Channel capacity for clean button transitions
const TRANSITION_CHANNEL_SIZE: usize = 16;

/// Channel capacity for commands waiting to be sent
const OUTGOING_CHANNEL_SIZE: usize = 8;

/// Debounced button transitions, edge task to gesture task
pub static TRANSITIONS: Channel<CriticalSectionRawMutex, ButtonTransition, TRANSITION_CHANNEL_SIZE> =
    Channel::new();

/// Commands for the rig, gesture task to link task
pub static OUTGOING: Channel<CriticalSectionRawMutex, Command, OUTGOING_CHANNEL_SIZE> =
    Channel::new();
