//! Remote link receive task
//!
//! Receives frames from the remote, routes commands to the sequencer.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use kineto_core::sequencer::{CommandBacklog, Dispatch};
use kineto_protocol::{FrameParser, LinkMessage};

use crate::channels::{COMMANDS, HEARTBEAT_RECEIVED, HOME_INTERRUPT, SEQUENCER_BUSY};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the remote
///
/// Never blocks on the command queue: while it is full, commands wait in
/// the backlog and reading continues, so home requests and heartbeats keep
/// arriving.
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut backlog = CommandBacklog::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let read = match backlog.front() {
            Some(command) => match select(COMMANDS.send(command), rx.read(&mut buf)).await {
                Either::First(()) => {
                    backlog.pop();
                    continue;
                }
                Either::Second(read) => read,
            },
            None => rx.read(&mut buf).await,
        };

        match read {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match LinkMessage::from_frame(&frame) {
                            Ok(message) => {
                                HEARTBEAT_RECEIVED.signal(());
                                handle_message(message, &mut backlog);
                            }
                            Err(e) => {
                                warn!("Failed to parse link message: {:?}", e);
                            }
                        },
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Handle a parsed link message
fn handle_message(message: LinkMessage, backlog: &mut CommandBacklog) {
    if message == LinkMessage::Ping {
        trace!("PING received");
        return;
    }

    let Some(command) = message.known_command() else {
        warn!("Ignoring unknown command {:?}", message);
        return;
    };

    let busy = SEQUENCER_BUSY.load(Ordering::Acquire);
    match backlog.dispatch(command, busy) {
        Dispatch::Interrupt => {
            debug!("Home while busy, interrupting");
            HOME_INTERRUPT.signal(());
        }
        Dispatch::Held => {
            debug!("Queueing {:?}", command);
        }
        Dispatch::Dropped => {
            warn!("Command backlog full, dropping {:?}", command);
        }
    }
}
