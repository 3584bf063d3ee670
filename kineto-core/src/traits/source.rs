//! Command source for an idle sequencer

use kineto_protocol::Command;

use super::preempt::PreemptionSource;

/// Queue of commands plus the single-slot home interrupt
///
/// The home interrupt is read through [`PreemptionSource`], both by a
/// running sequence at its checkpoints and by the idle sequencer before it
/// waits for more work.
pub trait CommandSource: PreemptionSource {
    /// Wait for the next queued command or a new home request
    ///
    /// A home request that arrives while waiting resolves to
    /// [`Command::Home`] and is consumed.
    fn next_command(&mut self) -> impl core::future::Future<Output = Command>;
}
