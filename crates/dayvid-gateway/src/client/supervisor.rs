//! Connection supervisor
//!
//! Owns one gateway connection from connect to teardown. Three tasks take part
//! in a live connection: the receive loop (run by the supervisor itself), the
//! heartbeat timer and the socket writer. The receive loop is the only one
//! that decides when the connection ends.

use super::close::CloseReason;
use super::config::GatewayConfig;
use super::endpoint::{connect_url, EndpointResolver};
use super::writer;
use crate::connection::{FaultSender, FrameSender, Handshake, HeartbeatScheduler, SessionState};
use crate::error::GatewayResult;
use crate::handlers::{DispatchRouter, EventHandler};
use crate::protocol::{codec, GatewayFrame, IdentifyPayload, Inbound, OpCode};
use futures_util::StreamExt;
use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use url::Url;

/// Runs gateway connections
///
/// Each call to [`run`](Self::run) opens one connection and returns when it
/// ends. There is no reconnect: calling `run` again starts a fresh session.
pub struct ConnectionSupervisor {
    config: GatewayConfig,
    resolver: Arc<dyn EndpointResolver>,
    handler: Arc<dyn EventHandler>,
}

impl ConnectionSupervisor {
    /// Create a supervisor
    pub fn new(
        config: GatewayConfig,
        resolver: Arc<dyn EndpointResolver>,
        handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            config,
            resolver,
            handler,
        }
    }

    /// Resolve the endpoint, connect and run the connection until it ends
    ///
    /// `shutdown` completing ends the connection with [`CloseReason::Shutdown`].
    pub async fn run<F>(&self, shutdown: F) -> CloseReason
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let url = match self.resolve_url().await {
            Ok(url) => url,
            Err(e) => return finish(CloseReason::Failed(e)),
        };

        tracing::info!(url = %url, "Connecting to gateway");

        let stream = tokio::select! {
            biased;
            () = &mut shutdown => return finish(CloseReason::Shutdown),
            result = tokio_tungstenite::connect_async(url.as_str()) => match result {
                Ok((stream, _response)) => stream,
                Err(e) => return finish(CloseReason::Failed(e.into())),
            },
        };

        self.run_on(stream, shutdown).await
    }

    /// Run the session over an already-open WebSocket
    pub async fn run_on<S, F>(&self, stream: WebSocketStream<S>, shutdown: F) -> CloseReason
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let (sink, mut stream) = stream.split();
        let (outbound, frames) = FrameSender::channel();
        let (faults, mut fault_rx) = mpsc::unbounded_channel();

        let mut writer = tokio::spawn(writer::run(sink, frames, faults.clone()));
        let mut connection = Connection::new(
            self.config.identify_payload(),
            outbound,
            faults,
            Arc::clone(&self.handler),
        );

        tracing::debug!("Gateway connection open, awaiting Hello");

        let reason = loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break CloseReason::Shutdown,
                Some(fault) = fault_rx.recv() => break CloseReason::Failed(fault),
                message = stream.next() => match message {
                    Some(Ok(message)) => {
                        if let Some(reason) = connection.on_message(message) {
                            break reason;
                        }
                    }
                    Some(Err(e)) => break CloseReason::Failed(e.into()),
                    None => break CloseReason::StreamEnded,
                },
            }
        };

        // Heartbeat first, so nothing is queued behind the writer's Close
        let router = connection.close().await;

        if timeout(self.config.close_timeout, &mut writer).await.is_err() {
            tracing::warn!("Socket writer did not finish in time, aborting it");
            writer.abort();
        }
        drop(stream);

        router.shutdown(self.config.close_timeout).await;

        finish(reason)
    }

    async fn resolve_url(&self) -> GatewayResult<Url> {
        let base = self.resolver.resolve().await?;
        tracing::debug!(base = %base, "Gateway endpoint resolved");
        connect_url(&base, self.config.version)
    }
}

fn finish(reason: CloseReason) -> CloseReason {
    if reason.is_shutdown() {
        tracing::info!(reason = %reason, "Gateway connection closed");
    } else {
        tracing::warn!(kind = reason.kind(), reason = %reason, "Gateway connection closed");
    }
    reason
}

/// State of one live connection, owned by the receive loop
struct Connection {
    session: Arc<SessionState>,
    handshake: Handshake,
    heartbeat: HeartbeatScheduler,
    router: DispatchRouter,
    outbound: FrameSender,
}

impl Connection {
    fn new(
        identify: IdentifyPayload,
        outbound: FrameSender,
        faults: FaultSender,
        handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            session: SessionState::new(),
            handshake: Handshake::new(identify),
            heartbeat: HeartbeatScheduler::new(outbound.clone(), faults),
            router: DispatchRouter::new(handler),
            outbound,
        }
    }

    /// Process one WebSocket message; `Some` ends the connection
    fn on_message(&mut self, message: Message) -> Option<CloseReason> {
        match codec::decode_message(message) {
            Ok(Inbound::Frame(frame)) => self.on_frame(&frame),
            Ok(Inbound::Close(frame)) => Some(CloseReason::remote(frame)),
            Ok(Inbound::Control) => None,
            Err(e) => Some(CloseReason::Failed(e)),
        }
    }

    fn on_frame(&mut self, frame: &GatewayFrame) -> Option<CloseReason> {
        match frame.opcode() {
            Some(OpCode::Hello) => self.on_hello(frame).err().map(CloseReason::Failed),
            Some(OpCode::Reconnect) => Some(CloseReason::ReconnectRequested),
            Some(OpCode::InvalidSession) => Some(CloseReason::SessionInvalidated {
                resumable: frame.d.as_bool().unwrap_or(false),
            }),
            Some(OpCode::Dispatch) => {
                if self.handshake.on_dispatch(&self.session) {
                    tracing::info!(
                        event = frame.t.as_deref().unwrap_or_default(),
                        "Gateway session established"
                    );
                }
                self.router.route(frame, &self.session);
                None
            }
            _ => {
                self.router.route(frame, &self.session);
                None
            }
        }
    }

    /// Stop the heartbeat and drop every outbound sender, keeping the router
    async fn close(mut self) -> DispatchRouter {
        self.heartbeat.shutdown().await;
        self.router
    }

    fn on_hello(&mut self, frame: &GatewayFrame) -> GatewayResult<()> {
        let accepted = self.handshake.on_hello(frame, &self.session)?;
        self.outbound.send(accepted.identify)?;
        self.heartbeat
            .start(accepted.heartbeat_interval, Arc::clone(&self.session))
    }
}
