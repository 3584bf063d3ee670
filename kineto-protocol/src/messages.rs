//! Message types for the remote-to-rig link
//!
//! The link is one-directional: the remote sends commands and heartbeats,
//! the rig never answers.

use crate::command::Command;
use crate::frame::{Frame, FrameError};

// Message type IDs: Remote → Rig
pub const MSG_COMMAND: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;

/// Messages sent from the remote to the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkMessage {
    /// Raw command byte
    ///
    /// Kept as a byte so the rig can see (and ignore) values it does not know.
    Command { byte: u8 },
    /// Heartbeat
    Ping,
}

impl LinkMessage {
    /// Wrap a known command
    pub fn command(cmd: Command) -> Self {
        LinkMessage::Command {
            byte: cmd.to_byte(),
        }
    }

    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_COMMAND => match frame.payload.first() {
                Some(&byte) => Ok(LinkMessage::Command { byte }),
                None => Err(FrameError::InvalidFrame),
            },
            MSG_PING => Ok(LinkMessage::Ping),
            other => Err(FrameError::UnknownType(other)),
        }
    }

    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            LinkMessage::Command { byte } => Frame::new(MSG_COMMAND, &[*byte]),
            LinkMessage::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }

    /// Decode the command carried by this message, if it is a known one
    pub fn known_command(&self) -> Option<Command> {
        match self {
            LinkMessage::Command { byte } => Command::from_byte(*byte),
            LinkMessage::Ping => None,
        }
    }
}
