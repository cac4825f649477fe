//! Gateway endpoint resolution
//!
//! The supervisor asks an [`EndpointResolver`] for the base gateway URL on
//! every connection attempt and appends the protocol query parameters itself.

use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use url::Url;

/// Encoding requested from the gateway. Only JSON is spoken.
pub const GATEWAY_ENCODING: &str = "json";

/// Source of the base gateway URL
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    /// Resolve the base WebSocket URL, without query parameters
    async fn resolve(&self) -> GatewayResult<String>;
}

/// Resolver returning a fixed URL
#[derive(Debug, Clone)]
pub struct StaticEndpoint(pub String);

impl StaticEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }
}

#[async_trait]
impl EndpointResolver for StaticEndpoint {
    async fn resolve(&self) -> GatewayResult<String> {
        Ok(self.0.clone())
    }
}

/// Build the connect URL from a resolved base URL
///
/// Appends `v=<version>` and `encoding=json`, keeping any query parameters the
/// base URL already carries.
pub fn connect_url(base: &str, version: u8) -> GatewayResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| GatewayError::Resolve(format!("invalid gateway url {base:?}: {e}")))?;

    if !matches!(url.scheme(), "ws" | "wss") {
        return Err(GatewayError::Resolve(format!(
            "gateway url must use ws or wss, got {:?}",
            url.scheme()
        )));
    }

    url.query_pairs_mut()
        .append_pair("v", &version.to_string())
        .append_pair("encoding", GATEWAY_ENCODING);

    Ok(url)
}
