//! Gateway error types

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

/// Errors raised by the gateway session core
///
/// Every variant is fatal to the connection it occurs on. Application handler
/// failures are a separate type ([`crate::handlers::HandlerError`]) because
/// they never end a connection.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Inbound data is not JSON, lacks an integer `op`, or has a payload the
    /// op code requires but cannot be read (e.g. Hello without an interval)
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// A second Hello arrived on a connection that already started its handshake
    #[error("Unexpected Hello: handshake already started on this connection")]
    UnexpectedHello,

    /// The heartbeat scheduler was started while a timer was still running
    #[error("Heartbeat scheduler already running")]
    AlreadyRunning,

    /// Socket or network failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The gateway endpoint could not be resolved
    #[error("Failed to resolve gateway endpoint: {0}")]
    Resolve(String),

    /// An outgoing frame could not be serialized
    #[error("Failed to encode frame: {0}")]
    Encode(String),
}

impl GatewayError {
    /// Create a malformed frame error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedFrame(message.into())
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Short machine-readable name, used as a tracing field
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedFrame(_) => "malformed_frame",
            Self::UnexpectedHello => "unexpected_hello",
            Self::AlreadyRunning => "already_running",
            Self::Transport(_) => "transport",
            Self::Resolve(_) => "resolve",
            Self::Encode(_) => "encode",
        }
    }
}

impl From<WsError> for GatewayError {
    fn from(err: WsError) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Gateway result type
pub type GatewayResult<T> = Result<T, GatewayError>;
