//! Dispatch router

use super::EventHandler;
use crate::connection::SessionState;
use crate::events::DispatchEvent;
use crate::protocol::{GatewayFrame, OpCode};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// What the router did with a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Dispatch event queued for the handler
    Dispatched {
        /// Event name
        event_type: String,
    },
    /// Heartbeat ACK, nothing to do
    Acknowledged,
    /// Op code with no routing behaviour (including unknown op codes)
    Ignored {
        /// Raw op code
        op: u64,
    },
}

/// Routes inbound frames for one connection
///
/// Handler calls run on a dedicated task, one event at a time and in arrival
/// order, so a slow or failing handler never stalls the receive loop. The
/// queue in between is unbounded: the receive loop never waits for the
/// handler, so the backlog grows with whatever the server sends.
///
/// Call [`shutdown`](Self::shutdown) to bound the handler's lifetime. A router
/// that is simply dropped leaves the worker running until the queued events
/// are handled.
pub struct DispatchRouter {
    events: mpsc::UnboundedSender<DispatchEvent>,
    worker: JoinHandle<()>,
}

impl DispatchRouter {
    /// Create a router feeding `handler`
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(handler: Arc<dyn EventHandler>) -> Self {
        let (events, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_handler(handler, rx));
        Self { events, worker }
    }

    /// Stop accepting events and give the handler `grace` to finish the
    /// queued ones; the worker is aborted after that
    pub async fn shutdown(self, grace: Duration) {
        let Self { events, mut worker } = self;
        drop(events);

        if timeout(grace, &mut worker).await.is_err() {
            tracing::warn!("Event handler did not drain in time, aborting it");
            worker.abort();
        }
    }

    /// Route one frame
    ///
    /// Any frame carrying a sequence number updates the session's last
    /// sequence, whatever its op code.
    pub fn route(&self, frame: &GatewayFrame, session: &SessionState) -> Route {
        if let Some(seq) = frame.s {
            session.set_last_sequence(seq);
        }

        match frame.opcode() {
            Some(OpCode::Dispatch) => {
                let event = DispatchEvent::from_frame(frame);
                let event_type = event.event_type.clone();

                tracing::debug!(event = %event_type, seq = ?frame.s, "Dispatch received");

                if self.events.send(event).is_err() {
                    tracing::error!(event = %event_type, "Event handler task is gone, dropping event");
                }
                Route::Dispatched { event_type }
            }
            Some(OpCode::HeartbeatAck) => {
                tracing::trace!("Heartbeat ACK received");
                Route::Acknowledged
            }
            _ => {
                tracing::trace!(op = frame.op, "Ignoring frame");
                Route::Ignored { op: frame.op }
            }
        }
    }
}

async fn run_handler(
    handler: Arc<dyn EventHandler>,
    mut events: mpsc::UnboundedReceiver<DispatchEvent>,
) {
    while let Some(event) = events.recv().await {
        let event_type = event.event_type.clone();

        match AssertUnwindSafe(handler.handle(event)).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(event = %event_type, error = %e, "Event handler failed");
            }
            Err(_) => {
                tracing::error!(event = %event_type, "Event handler panicked");
            }
        }
    }
}
