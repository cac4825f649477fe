//! Transport frame codec
//!
//! Converts between [`GatewayFrame`] and the JSON text carried by the
//! WebSocket transport. Only structural validity is checked here: the data
//! must be a JSON object with an integer `op`. Op-code specific payload shapes
//! are validated by whoever consumes the frame.

use super::{GatewayFrame, OpCode};
use crate::error::{GatewayError, GatewayResult};
use serde::Serialize;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

/// Encode an op code and payload as wire text
pub fn encode<T: Serialize>(op: OpCode, data: &T) -> GatewayResult<String> {
    let d = serde_json::to_value(data).map_err(|e| GatewayError::Encode(e.to_string()))?;
    encode_frame(&GatewayFrame::new(op, d))
}

/// Encode a complete frame as wire text
pub fn encode_frame(frame: &GatewayFrame) -> GatewayResult<String> {
    serde_json::to_string(frame).map_err(|e| GatewayError::Encode(e.to_string()))
}

/// Decode wire text into a frame
pub fn decode(text: &str) -> GatewayResult<GatewayFrame> {
    decode_bytes(text.as_bytes())
}

/// Decode raw wire bytes into a frame
pub fn decode_bytes(bytes: &[u8]) -> GatewayResult<GatewayFrame> {
    serde_json::from_slice(bytes).map_err(|e| GatewayError::MalformedFrame(e.to_string()))
}

/// What a single WebSocket message means to the gateway session
#[derive(Debug)]
pub enum Inbound {
    /// A gateway frame
    Frame(GatewayFrame),
    /// The peer closed the connection
    Close(Option<CloseFrame<'static>>),
    /// Transport-level control traffic (ping/pong), nothing to route
    Control,
}

/// Classify and decode a WebSocket message
pub fn decode_message(message: Message) -> GatewayResult<Inbound> {
    match message {
        Message::Text(text) => decode(&text).map(Inbound::Frame),
        Message::Binary(bytes) => decode_bytes(&bytes).map(Inbound::Frame),
        Message::Close(frame) => Ok(Inbound::Close(frame)),
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Ok(Inbound::Control),
    }
}

/// Encode a frame as a WebSocket text message
pub fn to_message(frame: &GatewayFrame) -> GatewayResult<Message> {
    encode_frame(frame).map(Message::Text)
}
