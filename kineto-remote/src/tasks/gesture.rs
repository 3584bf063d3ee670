//! Gesture classification task
//!
//! Turns clean transitions into gestures and queues one command per
//! gesture. While a burst window is open the task races the next
//! transition against the window deadline.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use kineto_core::config::GestureTiming;
use kineto_core::input::{GestureClassifier, Gestures};

use super::now;
use crate::channels::{OUTGOING, TRANSITIONS};

#[embassy_executor::task]
pub async fn gesture_task() {
    info!("Gesture task started");

    let mut classifier = GestureClassifier::new(GestureTiming::default());

    loop {
        let before = classifier.stats();

        let gestures = match classifier.burst_deadline() {
            Some(deadline) => {
                let wait_ms = now().ticks_until(deadline);
                match select(TRANSITIONS.receive(), Timer::after_millis(u64::from(wait_ms))).await {
                    Either::First(transition) => classifier.on_transition(transition),
                    Either::Second(()) => {
                        let mut gestures = Gestures::new();
                        if let Some(gesture) = classifier.poll(now()) {
                            let _ = gestures.push(gesture);
                        }
                        gestures
                    }
                }
            }
            None => classifier.on_transition(TRANSITIONS.receive().await),
        };

        let after = classifier.stats();
        if after.chatter_presses != before.chatter_presses {
            debug!("Chatter press dropped");
        }
        if after.noise_bursts != before.noise_bursts {
            debug!("Burst too long, dropped as noise");
        }

        for gesture in gestures {
            let command = gesture.command();
            debug!("Gesture {:?} -> {:?}", gesture, command);
            // Blocks while the link is backed up
            OUTGOING.send(command).await;
        }
    }
}
