//! Gateway op codes

use std::fmt;

/// Op codes this client acts on
///
/// Frames keep `op` as a raw integer. Anything not listed here is an unknown
/// op code: it decodes fine and is ignored by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Event dispatch (receive)
    Dispatch = 0,
    /// Heartbeat (send; the server may also request one)
    Heartbeat = 1,
    /// Identify (send)
    Identify = 2,
    /// Server asks for a new connection (receive)
    Reconnect = 7,
    /// Session rejected or expired (receive)
    InvalidSession = 9,
    /// First frame of every connection (receive)
    Hello = 10,
    /// Heartbeat acknowledged (receive)
    HeartbeatAck = 11,
}

impl OpCode {
    /// Look up a raw `op` value
    #[must_use]
    pub const fn from_raw(op: u64) -> Option<Self> {
        Some(match op {
            0 => Self::Dispatch,
            1 => Self::Heartbeat,
            2 => Self::Identify,
            7 => Self::Reconnect,
            9 => Self::InvalidSession,
            10 => Self::Hello,
            11 => Self::HeartbeatAck,
            _ => return None,
        })
    }

    /// Raw `op` value as it appears on the wire
    #[must_use]
    pub const fn raw(self) -> u64 {
        self as u64
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dispatch => "Dispatch",
            Self::Heartbeat => "Heartbeat",
            Self::Identify => "Identify",
            Self::Reconnect => "Reconnect",
            Self::InvalidSession => "InvalidSession",
            Self::Hello => "Hello",
            Self::HeartbeatAck => "HeartbeatAck",
        }
    }
}

impl From<OpCode> for u64 {
    fn from(op: OpCode) -> Self {
        op.raw()
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.raw())
    }
}
