//! Why a connection ended

use crate::error::GatewayError;
use crate::protocol::CloseCode;
use std::fmt;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;

/// Reason a supervised connection ended
#[derive(Debug)]
pub enum CloseReason {
    /// The local shutdown signal fired
    Shutdown,
    /// The server sent a Close frame
    RemoteClosed {
        /// Raw close code, if the frame carried one
        code: Option<u16>,
        /// Close reason text (may be empty)
        reason: String,
    },
    /// The stream ended without a Close frame
    StreamEnded,
    /// The server asked for a reconnect (op 7)
    ReconnectRequested,
    /// The server invalidated the session (op 9)
    SessionInvalidated {
        /// The `d` flag of the Invalid Session frame
        resumable: bool,
    },
    /// The connection failed
    Failed(GatewayError),
}

impl CloseReason {
    /// Build a reason from a received Close frame
    pub fn remote(frame: Option<CloseFrame<'_>>) -> Self {
        match frame {
            Some(frame) => Self::RemoteClosed {
                code: Some(u16::from(frame.code)),
                reason: frame.reason.into_owned(),
            },
            None => Self::RemoteClosed {
                code: None,
                reason: String::new(),
            },
        }
    }

    /// Gateway close code, when the server closed with one from the catalog
    pub fn close_code(&self) -> Option<CloseCode> {
        match self {
            Self::RemoteClosed {
                code: Some(code), ..
            } => CloseCode::from_u16(*code),
            _ => None,
        }
    }

    /// Whether a fresh connection could reasonably succeed
    ///
    /// False for a local shutdown and for close codes caused by configuration.
    pub fn can_restart(&self) -> bool {
        match self {
            Self::Shutdown => false,
            Self::RemoteClosed { .. } => self.close_code().map_or(true, CloseCode::can_restart),
            _ => true,
        }
    }

    /// Check if the connection ended because of the local shutdown signal
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Self::Shutdown)
    }

    /// Short machine-readable name, used as a tracing field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Shutdown => "shutdown",
            Self::RemoteClosed { .. } => "remote_closed",
            Self::StreamEnded => "stream_ended",
            Self::ReconnectRequested => "reconnect_requested",
            Self::SessionInvalidated { .. } => "session_invalidated",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => f.write_str("shut down locally"),
            Self::RemoteClosed { code: None, .. } => f.write_str("closed by server"),
            Self::RemoteClosed {
                code: Some(code),
                reason,
            } => {
                match CloseCode::from_u16(*code) {
                    Some(known) => write!(f, "closed by server: {known}")?,
                    None => write!(f, "closed by server with code {code}")?,
                }
                if !reason.is_empty() {
                    write!(f, ": {reason}")?;
                }
                Ok(())
            }
            Self::StreamEnded => f.write_str("stream ended"),
            Self::ReconnectRequested => f.write_str("server requested reconnect"),
            Self::SessionInvalidated { resumable } => {
                write!(f, "session invalidated (resumable: {resumable})")
            }
            Self::Failed(e) => write!(f, "connection failed: {e}"),
        }
    }
}

impl From<GatewayError> for CloseReason {
    fn from(err: GatewayError) -> Self {
        Self::Failed(err)
    }
}
