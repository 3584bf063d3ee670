//! Preemption source polled by running sequences

/// Source of pending "go home" requests
///
/// A running sequence polls this at each checkpoint. Taking a request
/// consumes it: each call drains at most one token.
pub trait PreemptionSource {
    /// Take one pending home request, if any
    fn take_home_request(&mut self) -> bool;
}

impl<F: FnMut() -> bool> PreemptionSource for F {
    fn take_home_request(&mut self) -> bool {
        self()
    }
}

/// Preemption source that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverPreempt;

impl PreemptionSource for NeverPreempt {
    fn take_home_request(&mut self) -> bool {
        false
    }
}
