//! Command routing on the rig

use heapless::Deque;
use kineto_protocol::Command;

/// Commands held by the receiver while the sequencer queue is full
pub const BACKLOG_SIZE: usize = 8;

/// Where an incoming command goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// Single-slot home interrupt, polled by the running sequence
    Interrupt,
    /// FIFO command queue
    Queue,
}

/// Route a command given whether a sequence is running
///
/// Only `Home` can overtake a running sequence. Everything else waits its
/// turn, and an idle sequencer takes `Home` from the queue like any other
/// command.
pub fn route(command: Command, busy: bool) -> Route {
    if busy && command.is_preempting() {
        Route::Interrupt
    } else {
        Route::Queue
    }
}

/// What happened to a dispatched command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Raise the home interrupt now
    Interrupt,
    /// Held in the backlog until the queue takes it
    Held,
    /// Backlog full; the command was dropped
    Dropped,
}

/// Receiver-side backlog in front of the sequencer queue
///
/// The link receiver must keep reading while the queue is full, or a home
/// command behind a queued burst never reaches the interrupt slot. Queued
/// commands wait here in arrival order; the receiver forwards the front
/// one whenever the queue has room.
#[derive(Debug, Clone, Default)]
pub struct CommandBacklog {
    pending: Deque<Command, BACKLOG_SIZE>,
    dropped: u32,
}

impl CommandBacklog {
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
            dropped: 0,
        }
    }

    /// Route an incoming command
    ///
    /// Home while busy is never held, however full the backlog is.
    pub fn dispatch(&mut self, command: Command, busy: bool) -> Dispatch {
        match route(command, busy) {
            Route::Interrupt => Dispatch::Interrupt,
            Route::Queue => match self.pending.push_back(command) {
                Ok(()) => Dispatch::Held,
                Err(_) => {
                    self.dropped = self.dropped.wrapping_add(1);
                    Dispatch::Dropped
                }
            },
        }
    }

    /// Oldest held command
    pub fn front(&self) -> Option<Command> {
        self.pending.front().copied()
    }

    /// Remove the oldest held command once the queue accepted it
    pub fn pop(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Commands dropped on a full backlog so far
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
