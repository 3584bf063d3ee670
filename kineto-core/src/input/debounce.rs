//! Two-contact debouncing
//!
//! The button is a changeover switch: pressing it opens the normally-closed
//! (NC) contact and then closes the normally-open (NO) contact. Both lines
//! bounce independently. Each detected edge is classified by re-sampling
//! both lines and resolving them into one pressed/released level; a
//! transition is emitted only when that level changes.

use crate::time::Tick;

/// Which sense line produced an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenseLine {
    /// Normally-closed contact
    Nc,
    /// Normally-open contact
    No,
}

/// An electrical edge on one of the sense lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawEdgeEvent {
    /// When the edge was detected
    pub timestamp: Tick,
    /// Line that moved
    pub line: SenseLine,
}

/// Both sense lines, sampled together
///
/// `true` means the line is asserted (reads its active level after any
/// configured inversion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineLevels {
    /// NC line asserted: the button is pressed
    pub nc_asserted: bool,
    /// NO line asserted: the button is released
    pub no_asserted: bool,
}

/// Clean button level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTransition {
    /// Timestamp of the edge that caused the change
    pub timestamp: Tick,
    /// New level
    pub pressed: bool,
}

/// Resolve both sense lines into a button level
///
/// NO takes precedence: while the NC contact is still bouncing open the NO
/// contact may already assert, and the button counts as released until NO
/// lets go. With neither line asserted the contact is in transit and the
/// level is unknown (`None`).
pub const fn resolve(levels: LineLevels) -> Option<bool> {
    if levels.no_asserted {
        Some(false)
    } else if levels.nc_asserted {
        Some(true)
    } else {
        None
    }
}

/// Level-change debouncer for the two-contact button
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    /// Last emitted level
    pressed: bool,
    /// Edges that did not change the level
    absorbed: u32,
}

impl Debouncer {
    /// Create a debouncer; the button starts released
    pub const fn new() -> Self {
        Self {
            pressed: false,
            absorbed: 0,
        }
    }

    /// Last emitted level
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Number of edges absorbed as bounce so far
    pub fn bounces_absorbed(&self) -> u32 {
        self.absorbed
    }

    /// Classify one edge given the line levels sampled after it
    ///
    /// Returns a transition only when the resolved level differs from the
    /// last emitted one.
    pub fn on_edge(&mut self, edge: RawEdgeEvent, levels: LineLevels) -> Option<ButtonTransition> {
        let level = resolve(levels).unwrap_or(self.pressed);
        if level == self.pressed {
            self.absorbed = self.absorbed.wrapping_add(1);
            return None;
        }

        self.pressed = level;
        Some(ButtonTransition {
            timestamp: edge.timestamp,
            pressed: level,
        })
    }
}
