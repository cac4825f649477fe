//! Test helpers for integration tests
//!
//! Provides a mock gateway server, a mock REST API and a handle for running
//! a gateway client in the background.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use dayvid_gateway::{
    CloseReason, ConnectionSupervisor, DispatchEvent, EventHandler, GatewayConfig, HandlerResult,
    StaticEndpoint,
};
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use crate::fixtures::{hello, FAILING_CHANNEL, TEST_TOKEN};

/// Upper bound for any single wait in a test
pub const WAIT: Duration = Duration::from_secs(5);

// ============================================================================
// Mock gateway
// ============================================================================

/// Gateway server accepting client connections on a local port
pub struct MockGateway {
    listener: TcpListener,
    addr: SocketAddr,
}

impl MockGateway {
    /// Bind to a free local port
    pub async fn bind() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        Ok(Self { listener, addr })
    }

    /// Base URL clients should connect to
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Accept the next client connection
    pub async fn accept(&self) -> Result<GatewayPeer> {
        let (stream, _) = timeout(WAIT, self.listener.accept())
            .await
            .context("timed out waiting for a client to connect")??;

        let captured = Arc::new(Mutex::new(String::new()));
        let uri = Arc::clone(&captured);
        let ws = tokio_tungstenite::accept_hdr_async(
            stream,
            move |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
                *uri.lock() = request.uri().to_string();
                Ok(response)
            },
        )
        .await?;

        let request_uri = captured.lock().clone();
        Ok(GatewayPeer { ws, request_uri })
    }
}

/// Server side of one client connection
pub struct GatewayPeer {
    ws: WebSocketStream<TcpStream>,
    /// Path and query the client connected with
    pub request_uri: String,
}

impl GatewayPeer {
    /// Send raw text
    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.ws.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Send a JSON frame
    pub async fn send_json(&mut self, frame: &Value) -> Result<()> {
        self.send_text(&frame.to_string()).await
    }

    /// Receive the next data or close message, skipping pings and pongs
    pub async fn recv(&mut self) -> Result<Message> {
        loop {
            let next = timeout(WAIT, self.ws.next())
                .await
                .context("timed out waiting for a message from the client")?;

            match next {
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                Some(message) => return Ok(message?),
                None => bail!("client connection ended"),
            }
        }
    }

    /// Receive the next message and parse it as a JSON frame
    pub async fn recv_frame(&mut self) -> Result<Value> {
        match self.recv().await? {
            Message::Text(text) => Ok(serde_json::from_str(&text)?),
            other => bail!("expected a text frame, got {other:?}"),
        }
    }

    /// Expect the client to close the connection
    pub async fn expect_close(&mut self) -> Result<()> {
        match timeout(WAIT, self.ws.next())
            .await
            .context("timed out waiting for the client to close")?
        {
            Some(Ok(Message::Close(_))) | None | Some(Err(_)) => Ok(()),
            Some(Ok(other)) => bail!("expected close, got {other:?}"),
        }
    }

    /// Send Hello and return the `d` of the Identify the client answers with
    pub async fn handshake(&mut self, heartbeat_interval: u64) -> Result<Value> {
        self.send_json(&hello(heartbeat_interval)).await?;
        let identify = self.recv_frame().await?;
        if identify["op"] != 2 {
            bail!("expected Identify, got {identify}");
        }
        Ok(identify["d"].clone())
    }

    /// Close the connection with a close code
    pub async fn close(&mut self, code: u16, reason: &str) -> Result<()> {
        self.ws
            .close(Some(CloseFrame {
                code: CloseCode::from(code),
                reason: reason.to_string().into(),
            }))
            .await?;
        Ok(())
    }
}

// ============================================================================
// Gateway client running in the background
// ============================================================================

/// Event handler forwarding every event to a channel
pub struct ChannelHandler {
    tx: mpsc::UnboundedSender<DispatchEvent>,
}

#[async_trait]
impl EventHandler for ChannelHandler {
    async fn handle(&self, event: DispatchEvent) -> HandlerResult<()> {
        let _ = self.tx.send(event);
        Ok(())
    }
}

/// Gateway client running on a background task
pub struct RunningClient {
    events: mpsc::UnboundedReceiver<DispatchEvent>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<CloseReason>,
}

impl RunningClient {
    /// Connect a client to `gateway_url` with the test token
    pub fn start(gateway_url: &str) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let supervisor = ConnectionSupervisor::new(
            GatewayConfig::new(TEST_TOKEN),
            Arc::new(StaticEndpoint::new(gateway_url)),
            Arc::new(ChannelHandler { tx }),
        );

        let task = tokio::spawn(async move {
            supervisor
                .run(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Self {
            events,
            shutdown: Some(shutdown_tx),
            task,
        }
    }

    /// Next event delivered to the handler
    pub async fn next_event(&mut self) -> Result<DispatchEvent> {
        timeout(WAIT, self.events.recv())
            .await
            .context("timed out waiting for a dispatch event")?
            .context("event handler dropped")
    }

    /// Fire the shutdown signal
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the connection to end
    pub async fn finish(self) -> Result<CloseReason> {
        Ok(timeout(WAIT, self.task)
            .await
            .context("timed out waiting for the client to stop")??)
    }
}

// ============================================================================
// Mock REST API
// ============================================================================

/// A REST call received by the mock API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    SendMessage {
        channel_id: String,
        content: String,
        auth: Option<String>,
    },
    AddReaction {
        channel_id: String,
        message_id: String,
        emoji: String,
        auth: Option<String>,
    },
}

#[derive(Clone)]
struct ApiState {
    gateway_url: String,
    calls: Arc<Mutex<Vec<ApiCall>>>,
}

/// REST API server recording message and reaction calls
pub struct MockApi {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<ApiCall>>>,
    _handle: JoinHandle<()>,
}

impl MockApi {
    /// Start the API; `GET /gateway` answers with `gateway_url`
    pub async fn start(gateway_url: impl Into<String>) -> Result<Self> {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = ApiState {
            gateway_url: gateway_url.into(),
            calls: Arc::clone(&calls),
        };

        let app = Router::new()
            .route("/api/gateway", get(get_gateway))
            .route("/api/channels/:channel_id/messages", post(create_message))
            .route(
                "/api/channels/:channel_id/messages/:message_id/reactions/:emoji/@me",
                put(add_reaction),
            )
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            calls,
            _handle: handle,
        })
    }

    /// Base URL to configure the REST client with
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    /// Wait until at least `count` calls were received
    pub async fn wait_for_calls(&self, count: usize) -> Result<Vec<ApiCall>> {
        let poll = async {
            loop {
                let calls = self.calls();
                if calls.len() >= count {
                    return calls;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };
        timeout(WAIT, poll)
            .await
            .with_context(|| format!("timed out waiting for {count} API calls"))
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn get_gateway(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({ "url": state.gateway_url }))
}

async fn create_message(
    State(state): State<ApiState>,
    Path(channel_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let failing = channel_id == FAILING_CHANNEL;
    state.calls.lock().push(ApiCall::SendMessage {
        channel_id,
        content: body["content"].as_str().unwrap_or_default().to_string(),
        auth: authorization(&headers),
    });

    if failing {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

async fn add_reaction(
    State(state): State<ApiState>,
    Path((channel_id, message_id, emoji)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> StatusCode {
    state.calls.lock().push(ApiCall::AddReaction {
        channel_id,
        message_id,
        emoji,
        auth: authorization(&headers),
    });
    StatusCode::NO_CONTENT
}
