//! Socket writer task
//!
//! The only place that writes to the socket. Drains the outbound queue until
//! every [`FrameSender`](crate::connection::FrameSender) is dropped, then
//! sends a Close frame.

use crate::connection::FaultSender;
use crate::error::GatewayError;
use crate::protocol::{codec, GatewayFrame};
use futures_util::{Sink, SinkExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};

/// Write queued frames to `sink` until the queue closes
pub(crate) async fn run<S>(
    mut sink: S,
    mut frames: mpsc::UnboundedReceiver<GatewayFrame>,
    faults: FaultSender,
) where
    S: Sink<Message, Error = WsError> + Unpin,
{
    while let Some(frame) = frames.recv().await {
        let message = match codec::to_message(&frame) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(op = frame.op, error = %e, "Failed to encode outgoing frame");
                let _ = faults.send(e);
                return;
            }
        };

        if let Err(e) = sink.send(message).await {
            tracing::warn!(op = frame.op, error = %e, "Failed to write frame to socket");
            let _ = faults.send(GatewayError::from(e));
            return;
        }

        tracing::trace!(op = frame.op, "Frame written");
    }

    // All senders gone: the connection is being torn down
    if let Err(e) = sink.close().await {
        tracing::debug!(error = %e, "Error while closing socket");
    }
}
