//! Outbound frame queue
//!
//! All frames written to the socket go through one unbounded queue drained by
//! the writer task, so senders never wait on the network.

use crate::error::{GatewayError, GatewayResult};
use crate::protocol::GatewayFrame;
use tokio::sync::mpsc;

/// Channel on which background tasks report connection-fatal failures
pub type FaultSender = mpsc::UnboundedSender<GatewayError>;

/// Sending half of the outbound frame queue
#[derive(Debug, Clone)]
pub struct FrameSender {
    tx: mpsc::UnboundedSender<GatewayFrame>,
}

impl FrameSender {
    /// Create a queue, returning the sender and the receiver the writer drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GatewayFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a frame for sending
    ///
    /// Fails only when the writer has gone away, i.e. the transport is closed.
    pub fn send(&self, frame: GatewayFrame) -> GatewayResult<()> {
        self.tx
            .send(frame)
            .map_err(|_| GatewayError::transport("outbound queue closed"))
    }

    /// Check if the writer side has gone away
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
