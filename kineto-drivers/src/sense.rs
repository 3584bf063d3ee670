//! Two-contact button sense lines
//!
//! Owns the NC and NO input pins. Edge waiting and level sampling go
//! through the same pins so the levels read right after an edge are the
//! ones the debouncer classifies.

use embassy_futures::select::{select, Either};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;
use kineto_core::input::{LineLevels, SenseLine};

/// Electrical polarity of the sense lines
///
/// A line is asserted when it reads high. With the default wiring (pull-ups,
/// contacts switching to ground) a line reads high while its contact is
/// open: NC asserted means pressed, NO asserted means released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SenseConfig {
    /// NC line is active-low
    pub nc_inverted: bool,
    /// NO line is active-low
    pub no_inverted: bool,
}

/// NC and NO inputs of the button
pub struct SenseLines<NC, NO> {
    nc: NC,
    no: NO,
    config: SenseConfig,
}

impl<NC, NO> SenseLines<NC, NO>
where
    NC: InputPin + Wait,
    NO: InputPin + Wait,
{
    /// Wrap both pins
    pub fn new(nc: NC, no: NO, config: SenseConfig) -> Self {
        Self { nc, no, config }
    }

    /// Read both lines now
    ///
    /// A pin that fails to read counts as not asserted.
    pub fn sample(&mut self) -> LineLevels {
        LineLevels {
            nc_asserted: asserted(&mut self.nc, self.config.nc_inverted),
            no_asserted: asserted(&mut self.no, self.config.no_inverted),
        }
    }

    /// Wait for the next edge on either line
    ///
    /// When both lines move together the NC edge is reported; the
    /// debouncer re-samples both lines anyway.
    pub async fn wait_for_edge(&mut self) -> SenseLine {
        match select(self.nc.wait_for_any_edge(), self.no.wait_for_any_edge()).await {
            Either::First(_) => SenseLine::Nc,
            Either::Second(_) => SenseLine::No,
        }
    }
}

fn asserted<P: InputPin>(pin: &mut P, inverted: bool) -> bool {
    pin.is_high().map(|high| high != inverted).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use core::future::pending;
    use embassy_futures::block_on;
    use embedded_hal::digital::ErrorType;
    use kineto_core::input::{resolve, Debouncer, Gesture, GestureClassifier, RawEdgeEvent};
    use kineto_core::time::Tick;

    struct MockPin {
        high: bool,
        /// Edge already pending
        edge: bool,
    }

    impl MockPin {
        fn new(high: bool, edge: bool) -> Self {
            Self { high, edge }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    impl Wait for MockPin {
        async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
            pending().await
        }

        async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
            pending().await
        }

        async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
            pending().await
        }

        async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
            pending().await
        }

        async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
            if self.edge {
                self.edge = false;
                Ok(())
            } else {
                pending().await
            }
        }
    }

    #[test]
    fn test_sample_active_high() {
        let mut lines = SenseLines::new(
            MockPin::new(true, false),
            MockPin::new(false, false),
            SenseConfig::default(),
        );
        assert_eq!(
            lines.sample(),
            LineLevels {
                nc_asserted: true,
                no_asserted: false,
            }
        );
    }

    #[test]
    fn test_sample_inverted() {
        let config = SenseConfig {
            nc_inverted: true,
            no_inverted: true,
        };
        let mut lines = SenseLines::new(MockPin::new(true, false), MockPin::new(false, false), config);
        assert_eq!(
            lines.sample(),
            LineLevels {
                nc_asserted: false,
                no_asserted: true,
            }
        );
    }

    #[test]
    fn test_edge_on_no_line() {
        let mut lines = SenseLines::new(
            MockPin::new(false, false),
            MockPin::new(true, true),
            SenseConfig::default(),
        );
        assert_eq!(block_on(lines.wait_for_edge()), SenseLine::No);
    }

    #[test]
    fn test_nc_wins_simultaneous_edges() {
        let mut lines = SenseLines::new(
            MockPin::new(true, true),
            MockPin::new(false, true),
            SenseConfig::default(),
        );
        assert_eq!(block_on(lines.wait_for_edge()), SenseLine::Nc);
        assert_eq!(block_on(lines.wait_for_edge()), SenseLine::No);
    }

    /// Pins as the remote wires them: pulled up, contacts to ground
    fn board_lines(pressed: bool) -> SenseLines<MockPin, MockPin> {
        let nc_contact_closed = !pressed;
        let no_contact_closed = pressed;
        SenseLines::new(
            MockPin::new(!nc_contact_closed, false),
            MockPin::new(!no_contact_closed, false),
            SenseConfig::default(),
        )
    }

    #[test]
    fn test_board_wiring_idle_reads_released() {
        assert_eq!(resolve(board_lines(false).sample()), Some(false));
        assert_eq!(resolve(board_lines(true).sample()), Some(true));
    }

    #[test]
    fn test_board_wiring_short_press_is_single() {
        let mut debouncer = Debouncer::new();
        let mut classifier = GestureClassifier::default();
        let mut gestures = std::vec::Vec::new();

        // Idle, then a 100 ms press at 5000, then idle for a long time
        for (t, pressed) in [(0, false), (5000, true), (5100, false)] {
            let edge = RawEdgeEvent {
                timestamp: Tick::new(t),
                line: SenseLine::Nc,
            };
            if let Some(transition) = debouncer.on_edge(edge, board_lines(pressed).sample()) {
                assert_eq!(transition.pressed, pressed);
                gestures.extend(classifier.on_transition(transition));
            }
        }
        assert!(gestures.is_empty());
        gestures.extend(classifier.poll(Tick::new(15_100)));

        assert_eq!(gestures, [Gesture::ShortPressSingle]);
    }
}
