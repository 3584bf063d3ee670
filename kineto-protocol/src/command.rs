//! Command bytes carried from the remote to the rig

/// Commands understood by the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Drive both servos to rest; preempts a running sequence
    Home,
    /// Ramp the arm up slowly (flips the tip when already raised)
    RaiseSlow,
    /// Snap the arm up in one step
    RaiseFast,
    /// Shake both servos, then return home
    Tremor,
}

// Wire format values
const CMD_HOME: u8 = b'A';
const CMD_RAISE_SLOW: u8 = b'B';
const CMD_RAISE_FAST: u8 = b'C';
const CMD_TREMOR: u8 = b'D';

impl Command {
    /// All commands, in wire order
    pub const ALL: [Command; 4] = [
        Command::Home,
        Command::RaiseSlow,
        Command::RaiseFast,
        Command::Tremor,
    ];

    /// Parse a command from its wire format byte
    ///
    /// Unknown bytes yield `None`; the rig ignores them.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_HOME => Some(Command::Home),
            CMD_RAISE_SLOW => Some(Command::RaiseSlow),
            CMD_RAISE_FAST => Some(Command::RaiseFast),
            CMD_TREMOR => Some(Command::Tremor),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Home => CMD_HOME,
            Command::RaiseSlow => CMD_RAISE_SLOW,
            Command::RaiseFast => CMD_RAISE_FAST,
            Command::Tremor => CMD_TREMOR,
        }
    }

    /// Returns true for the command allowed to preempt a running sequence
    pub fn is_preempting(&self) -> bool {
        matches!(self, Command::Home)
    }
}
