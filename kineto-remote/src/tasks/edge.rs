//! Button edge task
//!
//! Waits for edges on either sense line, re-samples both lines and feeds
//! the debouncer. Clean transitions go to the gesture task.

use defmt::*;
use embassy_stm32::exti::ExtiInput;

use kineto_core::input::{Debouncer, RawEdgeEvent};
use kineto_drivers::sense::SenseLines;

use super::now;
use crate::channels::TRANSITIONS;

/// NC and NO contacts of the button
type ButtonLines = SenseLines<ExtiInput<'static>, ExtiInput<'static>>;

#[embassy_executor::task]
pub async fn edge_task(mut lines: ButtonLines) {
    info!("Edge task started");

    let mut debouncer = Debouncer::new();

    loop {
        let line = lines.wait_for_edge().await;
        let edge = RawEdgeEvent {
            timestamp: now(),
            line,
        };
        let levels = lines.sample();

        if let Some(transition) = debouncer.on_edge(edge, levels) {
            trace!(
                "Button {} at {}",
                if transition.pressed { "pressed" } else { "released" },
                transition.timestamp.raw()
            );
            TRANSITIONS.send(transition).await;
        }
    }
}
