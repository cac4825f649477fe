//! Gateway client configuration

use crate::protocol::{IdentifyPayload, IdentifyProperties};
use dayvid_common::AppConfig;
use std::fmt;
use std::time::Duration;

/// Gateway protocol version used when none is configured
pub const DEFAULT_GATEWAY_VERSION: u8 = 6;

/// How long teardown waits for the writer to flush and close the socket
const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for one gateway connection
#[derive(Clone)]
pub struct GatewayConfig {
    /// Bot token sent in Identify
    pub token: String,
    /// Gateway protocol version (`v` query parameter)
    pub version: u8,
    /// Client properties sent in Identify
    pub properties: IdentifyProperties,
    /// `large_threshold` sent in Identify
    pub large_threshold: u32,
    /// Upper bound on each teardown wait: the socket close, then the event
    /// handler finishing its queue
    pub close_timeout: Duration,
}

impl GatewayConfig {
    /// Create a configuration with default settings
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            version: DEFAULT_GATEWAY_VERSION,
            properties: IdentifyProperties::default(),
            large_threshold: IdentifyPayload::DEFAULT_LARGE_THRESHOLD,
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
        }
    }

    /// Build the gateway configuration from the application configuration
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            version: config.gateway.version,
            large_threshold: config.gateway.large_threshold,
            ..Self::new(config.bot.token.clone())
        }
    }

    /// Set client properties
    #[must_use]
    pub fn with_properties(mut self, properties: IdentifyProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Build the Identify payload for a new connection
    pub fn identify_payload(&self) -> IdentifyPayload {
        IdentifyPayload::new(self.token.clone())
            .with_properties(self.properties.clone())
            .with_large_threshold(self.large_threshold)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("token", &"<redacted>")
            .field("version", &self.version)
            .field("properties", &self.properties)
            .field("large_threshold", &self.large_threshold)
            .field("close_timeout", &self.close_timeout)
            .finish()
    }
}
