//! Remote link transmit task
//!
//! Frames outgoing commands and sends a heartbeat once a second.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_stm32::mode::Async;
use embassy_stm32::usart::UartTx;
use embassy_time::{Duration, Ticker};

use kineto_core::link::HEARTBEAT_MS;
use kineto_protocol::LinkMessage;

use crate::channels::OUTGOING;

#[embassy_executor::task]
pub async fn link_tx_task(mut tx: UartTx<'static, Async>) {
    info!("Link TX task started");

    let mut heartbeat = Ticker::every(Duration::from_millis(u64::from(HEARTBEAT_MS)));

    loop {
        let message = match select(OUTGOING.receive(), heartbeat.next()).await {
            Either::First(command) => LinkMessage::command(command),
            Either::Second(()) => LinkMessage::Ping,
        };

        let bytes = match message.to_frame().and_then(|frame| frame.encode_to_vec()) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to encode {:?}: {:?}", message, e);
                continue;
            }
        };

        match tx.write(&bytes).await {
            Ok(()) => trace!("Sent {:?}", message),
            Err(e) => warn!("UART write error: {:?}", e),
        }
    }
}
