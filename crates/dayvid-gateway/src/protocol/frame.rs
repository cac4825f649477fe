//! Gateway frame format
//!
//! Defines the structure shared by every JSON frame on the gateway connection.

use super::{HelloPayload, IdentifyPayload, OpCode};
use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Gateway frame
///
/// `op` is kept as the raw integer so that frames with op codes this client
/// does not know still decode; use [`GatewayFrame::opcode`] to classify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayFrame {
    /// Operation code
    pub op: u64,

    /// Sequence number (only for op=0 Dispatch)
    ///
    /// Anything other than a non-negative integer reads as absent.
    #[serde(
        default,
        deserialize_with = "lenient_sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub s: Option<u64>,

    /// Event type (only for op=0 Dispatch)
    ///
    /// Anything other than a string reads as absent.
    #[serde(
        default,
        deserialize_with = "lenient_event_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub t: Option<String>,

    /// Event data payload, `null` when absent
    #[serde(default)]
    pub d: Value,
}

impl GatewayFrame {
    /// Create a frame with an op code and payload
    #[must_use]
    pub fn new(op: OpCode, d: Value) -> Self {
        Self {
            op: op.raw(),
            s: None,
            t: None,
            d,
        }
    }

    // === Client Frames ===

    /// Create a Heartbeat frame (op=1) carrying the last seen sequence
    #[must_use]
    pub fn heartbeat(last_sequence: Option<u64>) -> Self {
        Self::new(
            OpCode::Heartbeat,
            last_sequence.map_or(Value::Null, |s| Value::Number(s.into())),
        )
    }

    /// Create an Identify frame (op=2)
    pub fn identify(payload: &IdentifyPayload) -> GatewayResult<Self> {
        let d = serde_json::to_value(payload).map_err(|e| GatewayError::Encode(e.to_string()))?;
        Ok(Self::new(OpCode::Identify, d))
    }

    // === Server Frames ===

    /// Create a Hello frame (op=10)
    #[must_use]
    pub fn hello(heartbeat_interval: u64) -> Self {
        Self::new(
            OpCode::Hello,
            serde_json::json!({ "heartbeat_interval": heartbeat_interval }),
        )
    }

    /// Create a Dispatch frame (op=0)
    #[must_use]
    pub fn dispatch(event_type: impl Into<String>, sequence: u64, data: Value) -> Self {
        Self {
            op: OpCode::Dispatch.raw(),
            s: Some(sequence),
            t: Some(event_type.into()),
            d: data,
        }
    }

    /// Create a Heartbeat ACK frame (op=11)
    #[must_use]
    pub fn heartbeat_ack() -> Self {
        Self::new(OpCode::HeartbeatAck, Value::Null)
    }

    // === Parsing ===

    /// The known op code of this frame, `None` for unknown op codes
    #[must_use]
    pub fn opcode(&self) -> Option<OpCode> {
        OpCode::from_raw(self.op)
    }

    /// Check whether this frame carries the given op code
    #[must_use]
    pub fn is(&self, op: OpCode) -> bool {
        self.opcode() == Some(op)
    }

    /// Parse the Hello payload (op=10)
    pub fn as_hello(&self) -> GatewayResult<HelloPayload> {
        if !self.is(OpCode::Hello) {
            return Err(GatewayError::malformed(format!(
                "expected Hello, got op {}",
                self.op
            )));
        }
        serde_json::from_value(self.d.clone())
            .map_err(|e| GatewayError::malformed(format!("invalid Hello payload: {e}")))
    }
}

fn lenient_sequence<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_u64())
}

fn lenient_event_type<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(t) => Some(t),
        _ => None,
    })
}

impl std::fmt::Display for GatewayFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.opcode() {
            Some(op) => write!(f, "GatewayFrame(op={op}")?,
            None => write!(f, "GatewayFrame(op=unknown ({})", self.op)?,
        }
        if let Some(t) = &self.t {
            write!(f, ", t={t}")?;
        }
        if let Some(s) = self.s {
            write!(f, ", s={s}")?;
        }
        write!(f, ")")
    }
}
