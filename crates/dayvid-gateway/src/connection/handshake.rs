//! Hello/Identify handshake
//!
//! Drives `AwaitingHello -> Identifying -> Established` once per connection.
//! There is no acknowledgement op code for Identify; the first Dispatch after
//! it is what confirms the session.

use super::SessionState;
use crate::error::{GatewayError, GatewayResult};
use crate::protocol::{GatewayFrame, IdentifyPayload};
use std::fmt;
use std::time::Duration;

/// Handshake state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    /// Connection open, Hello not yet received
    AwaitingHello,
    /// Identify sent, waiting for the first Dispatch
    Identifying,
    /// Session established
    Established,
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingHello => "awaiting_hello",
            Self::Identifying => "identifying",
            Self::Established => "established",
        };
        f.write_str(name)
    }
}

/// What the connection must do after a valid Hello
#[derive(Debug, Clone)]
pub struct HelloAccepted {
    /// Interval for the heartbeat scheduler
    pub heartbeat_interval: Duration,
    /// Identify frame to send
    pub identify: GatewayFrame,
}

/// Handshake state machine for one connection
#[derive(Debug)]
pub struct Handshake {
    state: HandshakeState,
    identify: IdentifyPayload,
}

impl Handshake {
    /// Create a handshake that will identify with the given payload
    #[must_use]
    pub fn new(identify: IdentifyPayload) -> Self {
        Self {
            state: HandshakeState::AwaitingHello,
            identify,
        }
    }

    /// Get the current state
    #[must_use]
    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Handle a Hello frame
    ///
    /// Records the heartbeat interval (and the frame's sequence, if any) in the
    /// session and returns the Identify frame to send. A Hello in any state
    /// other than `AwaitingHello` is rejected without re-identifying.
    pub fn on_hello(
        &mut self,
        frame: &GatewayFrame,
        session: &SessionState,
    ) -> GatewayResult<HelloAccepted> {
        if self.state != HandshakeState::AwaitingHello {
            tracing::warn!(state = %self.state, "Received Hello after handshake started");
            return Err(GatewayError::UnexpectedHello);
        }

        let hello = frame.as_hello()?;
        if hello.heartbeat_interval == 0 {
            return Err(GatewayError::malformed("heartbeat_interval must be positive"));
        }

        if !session.set_heartbeat_interval(hello.heartbeat_interval) {
            return Err(GatewayError::UnexpectedHello);
        }
        if let Some(seq) = frame.s {
            session.set_last_sequence(seq);
        }

        let identify = GatewayFrame::identify(&self.identify)?;
        self.state = HandshakeState::Identifying;

        tracing::debug!(
            heartbeat_interval_ms = hello.heartbeat_interval,
            "Hello received, identifying"
        );

        Ok(HelloAccepted {
            heartbeat_interval: Duration::from_millis(hello.heartbeat_interval),
            identify,
        })
    }

    /// Handle a Dispatch frame
    ///
    /// Returns `true` when this Dispatch completed the handshake.
    pub fn on_dispatch(&mut self, session: &SessionState) -> bool {
        if self.state != HandshakeState::Identifying {
            return false;
        }
        self.state = HandshakeState::Established;
        session.mark_handshake_complete()
    }
}
