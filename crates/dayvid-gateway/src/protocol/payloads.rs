//! Handshake payload definitions
//!
//! Defines the payload structures exchanged during the Hello/Identify handshake.

use serde::{Deserialize, Serialize};

/// Payload for op 10 (Hello)
///
/// Sent by the server immediately after connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloPayload {
    /// Heartbeat interval in milliseconds
    pub heartbeat_interval: u64,
}

/// Payload for op 2 (Identify)
///
/// Sent by the client to authenticate the session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyPayload {
    /// Bot token
    pub token: String,

    /// Client connection properties
    pub properties: IdentifyProperties,

    /// Whether the server may compress payloads (always false for this client)
    pub compress: bool,

    /// Member count above which a guild is considered large
    pub large_threshold: u32,
}

impl IdentifyPayload {
    /// Default large guild threshold
    pub const DEFAULT_LARGE_THRESHOLD: u32 = 250;

    /// Create an Identify payload with default properties
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            properties: IdentifyProperties::default(),
            compress: false,
            large_threshold: Self::DEFAULT_LARGE_THRESHOLD,
        }
    }

    /// Set client properties
    #[must_use]
    pub fn with_properties(mut self, properties: IdentifyProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Set the large guild threshold
    #[must_use]
    pub fn with_large_threshold(mut self, large_threshold: u32) -> Self {
        self.large_threshold = large_threshold;
        self
    }
}

impl std::fmt::Debug for IdentifyPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifyPayload")
            .field("token", &"<redacted>")
            .field("properties", &self.properties)
            .field("compress", &self.compress)
            .field("large_threshold", &self.large_threshold)
            .finish()
    }
}

/// Client connection properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyProperties {
    /// Operating system
    #[serde(rename = "$os", skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    /// Library name
    #[serde(rename = "$browser", skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    /// Device name
    #[serde(rename = "$device", skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl IdentifyProperties {
    /// Create empty properties (serializes as `{}`)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            os: None,
            browser: None,
            device: None,
        }
    }
}

impl Default for IdentifyProperties {
    fn default() -> Self {
        Self {
            os: Some(std::env::consts::OS.to_string()),
            browser: Some(env!("CARGO_PKG_NAME").to_string()),
            device: Some(env!("CARGO_PKG_NAME").to_string()),
        }
    }
}
