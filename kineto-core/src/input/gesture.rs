//! Press duration and burst classification
//!
//! Consumes clean button transitions in arrival order and turns press
//! episodes into gestures:
//!
//! - presses no longer than the noise floor are chatter and dropped;
//! - presses at or beyond the short/long boundary are long presses and are
//!   reported on release;
//! - anything in between is a short press candidate. The first candidate
//!   opens a burst window; candidates released inside the window join it.
//!   When the window closes the burst becomes a single, double or triple
//!   press, or is dropped as noise when it holds too many presses.
//!
//! The classifier never sleeps. The caller waits until
//! [`GestureClassifier::burst_deadline`] (racing it against the next
//! transition) and then calls [`GestureClassifier::poll`].

use heapless::Vec;
use kineto_protocol::Command;

use super::debounce::ButtonTransition;
use crate::config::GestureTiming;
use crate::time::Tick;

/// A recognised button gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// One short press
    ShortPressSingle,
    /// Two short presses in one burst
    ShortPressDouble,
    /// Three short presses in one burst
    ShortPressTriple,
    /// One long press
    LongPress,
}

impl Gesture {
    /// Gesture for a burst of `presses` short presses
    pub fn from_burst(presses: u8) -> Option<Self> {
        match presses {
            1 => Some(Gesture::ShortPressSingle),
            2 => Some(Gesture::ShortPressDouble),
            3 => Some(Gesture::ShortPressTriple),
            _ => None,
        }
    }

    /// Command sent to the rig for this gesture
    pub fn command(self) -> Command {
        match self {
            Gesture::ShortPressSingle => Command::Home,
            Gesture::ShortPressDouble => Command::RaiseSlow,
            Gesture::ShortPressTriple => Command::RaiseFast,
            Gesture::LongPress => Command::Tremor,
        }
    }
}

/// Classification of one press episode by its duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    /// Contact chatter, discarded
    Chatter,
    /// Short press candidate, clustered into a burst
    Short,
    /// Long press, reported immediately
    Long,
}

/// Classify a press by how long it was held
pub fn classify_press(elapsed_ticks: u32, timing: &GestureTiming) -> PressKind {
    if elapsed_ticks <= timing.noise_floor_ticks {
        PressKind::Chatter
    } else if elapsed_ticks < timing.short_long_boundary_ticks {
        PressKind::Short
    } else {
        PressKind::Long
    }
}

/// Gestures produced by one transition
///
/// At most two: a burst that expired before this transition, and a long
/// press completed by it.
pub type Gestures = Vec<Gesture, 2>;

/// Counters for discarded input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClassifierStats {
    /// Presses at or below the noise floor
    pub chatter_presses: u32,
    /// Bursts dropped for holding too many presses
    pub noise_bursts: u32,
    /// Releases seen without a preceding press
    pub orphan_releases: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Burst {
    /// Release time of the first short press
    opened: Tick,
    /// Short presses collected so far
    presses: u8,
}

/// Gesture classifier state
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    timing: GestureTiming,
    /// Start of the press in progress
    press_started: Option<Tick>,
    /// Open burst window
    burst: Option<Burst>,
    stats: ClassifierStats,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureTiming::default())
    }
}

impl GestureClassifier {
    /// Create a classifier with the given thresholds
    pub fn new(timing: GestureTiming) -> Self {
        Self {
            timing,
            press_started: None,
            burst: None,
            stats: ClassifierStats::default(),
        }
    }

    /// Thresholds in use
    pub fn timing(&self) -> &GestureTiming {
        &self.timing
    }

    /// Discard counters
    pub fn stats(&self) -> ClassifierStats {
        self.stats
    }

    /// Short presses collected in the open burst
    pub fn burst_presses(&self) -> u8 {
        self.burst.map(|b| b.presses).unwrap_or(0)
    }

    /// Tick at which the open burst resolves
    pub fn burst_deadline(&self) -> Option<Tick> {
        self.burst
            .map(|b| b.opened.offset(self.timing.burst_window_ticks))
    }

    /// Resolve the open burst if its window has elapsed at `now`
    ///
    /// Returns the burst's gesture, or `None` if no burst was due or the
    /// burst was noise.
    pub fn poll(&mut self, now: Tick) -> Option<Gesture> {
        let deadline = self.burst_deadline()?;
        if !now.has_reached(deadline) {
            return None;
        }

        let presses = self.burst.take().map(|b| b.presses).unwrap_or(0);
        let gesture = Some(presses)
            .filter(|&n| n <= self.timing.max_burst_presses)
            .and_then(Gesture::from_burst);
        if gesture.is_none() {
            // Too many presses, or more than a gesture can express
            self.stats.noise_bursts = self.stats.noise_bursts.wrapping_add(1);
        }
        gesture
    }

    /// Feed the next transition
    ///
    /// A burst whose window closed before this transition is resolved
    /// first, so gestures always come out in time order.
    pub fn on_transition(&mut self, transition: ButtonTransition) -> Gestures {
        let mut gestures = Gestures::new();

        if let Some(gesture) = self.poll(transition.timestamp) {
            let _ = gestures.push(gesture);
        }

        if transition.pressed {
            self.press_started = Some(transition.timestamp);
            return gestures;
        }

        let Some(started) = self.press_started.take() else {
            self.stats.orphan_releases = self.stats.orphan_releases.wrapping_add(1);
            return gestures;
        };

        let elapsed = transition.timestamp.elapsed_since(started);
        match classify_press(elapsed, &self.timing) {
            PressKind::Chatter => {
                self.stats.chatter_presses = self.stats.chatter_presses.wrapping_add(1);
            }
            PressKind::Short => match self.burst.as_mut() {
                Some(burst) => burst.presses = burst.presses.saturating_add(1),
                None => {
                    self.burst = Some(Burst {
                        opened: transition.timestamp,
                        presses: 1,
                    })
                }
            },
            PressKind::Long => {
                let _ = gestures.push(Gesture::LongPress);
            }
        }

        gestures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(t: u32) -> ButtonTransition {
        ButtonTransition {
            timestamp: Tick::new(t),
            pressed: true,
        }
    }

    fn release(t: u32) -> ButtonTransition {
        ButtonTransition {
            timestamp: Tick::new(t),
            pressed: false,
        }
    }

    /// Press at `t`, release `held` ticks later
    fn tap(c: &mut GestureClassifier, t: u32, held: u32) -> Gestures {
        let mut out = c.on_transition(press(t));
        for g in c.on_transition(release(t + held)) {
            out.push(g).unwrap();
        }
        out
    }

    #[test]
    fn test_classify_press_boundaries() {
        let timing = GestureTiming::default();
        assert_eq!(classify_press(0, &timing), PressKind::Chatter);
        assert_eq!(classify_press(10, &timing), PressKind::Chatter);
        assert_eq!(classify_press(11, &timing), PressKind::Short);
        assert_eq!(classify_press(499, &timing), PressKind::Short);
        assert_eq!(classify_press(500, &timing), PressKind::Long);
    }

    #[test]
    fn test_gesture_commands() {
        assert_eq!(Gesture::ShortPressSingle.command(), Command::Home);
        assert_eq!(Gesture::ShortPressDouble.command(), Command::RaiseSlow);
        assert_eq!(Gesture::ShortPressTriple.command(), Command::RaiseFast);
        assert_eq!(Gesture::LongPress.command(), Command::Tremor);
    }

    #[test]
    fn test_chatter_is_dropped() {
        let mut c = GestureClassifier::default();
        assert!(tap(&mut c, 100, 10).is_empty());
        assert_eq!(c.burst_deadline(), None);
        assert_eq!(c.stats().chatter_presses, 1);
    }

    #[test]
    fn test_single_short_press_waits_for_window() {
        let mut c = GestureClassifier::default();
        assert!(tap(&mut c, 100, 50).is_empty());

        // Window opens at the release (150)
        assert_eq!(c.burst_deadline(), Some(Tick::new(1150)));
        assert_eq!(c.poll(Tick::new(1149)), None);
        assert_eq!(c.poll(Tick::new(1150)), Some(Gesture::ShortPressSingle));
        assert_eq!(c.burst_deadline(), None);
        assert_eq!(c.poll(Tick::new(5000)), None);
    }

    #[test]
    fn test_double_and_triple() {
        let mut c = GestureClassifier::default();
        tap(&mut c, 0, 60);
        tap(&mut c, 200, 60);
        assert_eq!(c.burst_presses(), 2);
        assert_eq!(c.poll(Tick::new(1060)), Some(Gesture::ShortPressDouble));

        tap(&mut c, 3000, 60);
        tap(&mut c, 3200, 60);
        tap(&mut c, 3400, 60);
        assert_eq!(c.poll(Tick::new(4059)), None);
        assert_eq!(c.poll(Tick::new(4060)), Some(Gesture::ShortPressTriple));
    }

    #[test]
    fn test_four_presses_are_noise() {
        let mut c = GestureClassifier::default();
        for i in 0..4 {
            tap(&mut c, i * 150, 40);
        }
        assert_eq!(c.poll(Tick::new(2000)), None);
        assert_eq!(c.stats().noise_bursts, 1);
        assert_eq!(c.burst_deadline(), None);
    }

    #[test]
    fn test_noise_counted_above_gesture_range() {
        let timing = GestureTiming {
            max_burst_presses: 5,
            ..GestureTiming::default()
        };
        let mut c = GestureClassifier::new(timing);
        for i in 0..4 {
            tap(&mut c, i * 150, 40);
        }
        assert_eq!(c.poll(Tick::new(2000)), None);
        assert_eq!(c.stats().noise_bursts, 1);
    }

    #[test]
    fn test_long_press_is_immediate() {
        let mut c = GestureClassifier::default();
        let out = tap(&mut c, 100, 700);
        assert_eq!(out.as_slice(), &[Gesture::LongPress]);
    }

    #[test]
    fn test_long_press_does_not_merge_with_burst() {
        let mut c = GestureClassifier::default();
        tap(&mut c, 0, 50);
        let out = tap(&mut c, 100, 600);
        assert_eq!(out.as_slice(), &[Gesture::LongPress]);

        // The burst still holds one press and resolves on its own schedule
        assert_eq!(c.burst_presses(), 1);
        assert_eq!(c.poll(Tick::new(1050)), Some(Gesture::ShortPressSingle));
    }

    #[test]
    fn test_expired_burst_resolves_before_next_press() {
        let mut c = GestureClassifier::default();
        tap(&mut c, 0, 50);

        // Next press comes after the window without an intervening poll
        let out = c.on_transition(press(2000));
        assert_eq!(out.as_slice(), &[Gesture::ShortPressSingle]);

        let out = c.on_transition(release(2060));
        assert!(out.is_empty());
        assert_eq!(c.burst_deadline(), Some(Tick::new(3060)));
    }

    #[test]
    fn test_press_released_after_window_starts_new_burst() {
        let mut c = GestureClassifier::default();
        tap(&mut c, 0, 50); // opens at 50, closes at 1050
        let out = tap(&mut c, 900, 200); // released at 1100
        assert_eq!(out.as_slice(), &[Gesture::ShortPressSingle]);
        assert_eq!(c.burst_presses(), 1);
        assert_eq!(c.burst_deadline(), Some(Tick::new(2100)));
    }

    #[test]
    fn test_orphan_release_is_ignored() {
        let mut c = GestureClassifier::default();
        assert!(c.on_transition(release(30)).is_empty());
        assert_eq!(c.stats().orphan_releases, 1);
    }

    #[test]
    fn test_press_across_counter_wrap() {
        let mut c = GestureClassifier::default();
        let start = u32::MAX - 20;
        assert!(c.on_transition(press(start)).is_empty());
        let out = c.on_transition(release(start.wrapping_add(600)));
        assert_eq!(out.as_slice(), &[Gesture::LongPress]);
    }
}
