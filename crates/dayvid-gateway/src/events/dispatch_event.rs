//! Application-facing dispatch events

use super::GatewayEventType;
use crate::protocol::GatewayFrame;
use serde_json::Value;

/// A decoded Dispatch frame, as handed to the application's event handler
///
/// Message fields are optional because only message events carry them; a
/// `READY` or `GUILD_CREATE` dispatch still produces an event with its name,
/// sequence and raw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchEvent {
    /// Event name from the `t` field (empty if the server omitted it)
    pub event_type: String,
    /// Sequence number of the frame
    pub sequence: Option<u64>,
    /// `d.channel_id`
    pub channel_id: Option<String>,
    /// `d.author.username`
    pub author_name: Option<String>,
    /// `d.author.bot`
    pub author_is_bot: bool,
    /// `d.id`
    pub message_id: Option<String>,
    /// `d.content`
    pub content: Option<String>,
    /// The untouched `d` payload
    pub data: Value,
}

impl DispatchEvent {
    /// Decode the event-specific payload of a Dispatch frame
    #[must_use]
    pub fn from_frame(frame: &GatewayFrame) -> Self {
        let d = &frame.d;
        let author = d.get("author");

        Self {
            event_type: frame.t.clone().unwrap_or_default(),
            sequence: frame.s,
            channel_id: string_field(d, "channel_id"),
            author_name: author.and_then(|a| string_field(a, "username")),
            author_is_bot: author
                .and_then(|a| a.get("bot"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
            message_id: string_field(d, "id"),
            content: string_field(d, "content"),
            data: d.clone(),
        }
    }

    /// The recognised event type, if any
    #[must_use]
    pub fn kind(&self) -> Option<GatewayEventType> {
        GatewayEventType::from_name(&self.event_type)
    }

    /// Check whether this event has the given type
    #[must_use]
    pub fn is(&self, kind: GatewayEventType) -> bool {
        self.event_type == kind.as_str()
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
