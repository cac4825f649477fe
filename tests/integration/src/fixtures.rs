//! Test fixtures
//!
//! Gateway frames and configuration used across the integration tests.

use anyhow::Result;
use dayvid_common::AppConfig;
use serde_json::{json, Value};

/// Token every test client identifies with
pub const TEST_TOKEN: &str = "integration-token";

/// Channel used by [`message_create`]
pub const TEST_CHANNEL: &str = "100";

/// Messages in this channel make the mock API answer 500
pub const FAILING_CHANNEL: &str = "broken";

/// Hello frame
pub fn hello(heartbeat_interval: u64) -> Value {
    json!({"op": 10, "d": {"heartbeat_interval": heartbeat_interval}, "s": null})
}

/// Dispatch frame
pub fn dispatch(seq: u64, event_type: &str, d: Value) -> Value {
    json!({"op": 0, "s": seq, "t": event_type, "d": d})
}

/// MESSAGE_CREATE in [`TEST_CHANNEL`]; the message id is `m<seq>`
pub fn message_create(seq: u64, author: &str, content: &str) -> Value {
    message_in(seq, TEST_CHANNEL, author, content)
}

/// MESSAGE_CREATE in an arbitrary channel
pub fn message_in(seq: u64, channel_id: &str, author: &str, content: &str) -> Value {
    dispatch(
        seq,
        "MESSAGE_CREATE",
        json!({
            "id": format!("m{seq}"),
            "channel_id": channel_id,
            "content": content,
            "author": {"username": author},
        }),
    )
}

/// Application config pointing at a mock REST API
pub fn bot_config(api_base_url: &str) -> Result<AppConfig> {
    Ok(AppConfig::from_lookup(|key| match key {
        "TOKEN" => Some(TEST_TOKEN.to_string()),
        "API_BASE_URL" => Some(api_base_url.to_string()),
        "HTTP_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })?)
}
