//! Remote-to-rig link protocol
//!
//! This crate defines the UART protocol between the remote (button board)
//! and the rig (servo board). The link carries one command byte per
//! recognised gesture, plus a periodic heartbeat.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–16B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The rig treats the command byte as opaque until it reaches the router:
//! bytes outside the known command set are ignored there.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;
pub mod messages;

pub use command::Command;
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{LinkMessage, MSG_COMMAND, MSG_PING};
