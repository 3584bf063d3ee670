//! Wraparound-tolerant tick arithmetic
//!
//! Every timing decision in the input pipeline goes through [`Tick`].
//! The counter is 32 bits wide and is allowed to wrap; differences are
//! computed with wrapping subtraction, so an interval stays correct across
//! the wrap as long as it is shorter than half the counter range.
//!
//! The core does not assume a tick rate. The firmware feeds milliseconds.

/// A point on the monotonic scheduler time base
///
/// Deliberately not `Ord`: comparing two raw counter values is meaningless
/// once the counter has wrapped. Use [`Tick::elapsed_since`] and
/// [`Tick::has_reached`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick(u32);

impl Tick {
    /// Create a tick from a raw counter value
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw counter value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Ticks elapsed from `earlier` to `self`
    pub const fn elapsed_since(self, earlier: Tick) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// The tick `ticks` after this one
    pub const fn offset(self, ticks: u32) -> Tick {
        Tick(self.0.wrapping_add(ticks))
    }

    /// True once `self` is at or past `deadline`
    pub const fn has_reached(self, deadline: Tick) -> bool {
        (self.0.wrapping_sub(deadline.0) as i32) >= 0
    }

    /// Ticks left until `deadline`, zero if already reached
    pub const fn ticks_until(self, deadline: Tick) -> u32 {
        if self.has_reached(deadline) {
            0
        } else {
            deadline.0.wrapping_sub(self.0)
        }
    }
}

impl From<u32> for Tick {
    fn from(raw: u32) -> Self {
        Tick::new(raw)
    }
}
