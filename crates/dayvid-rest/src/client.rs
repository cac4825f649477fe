//! REST client

use crate::error::{RestError, RestResult};
use async_trait::async_trait;
use dayvid_common::AppConfig;
use dayvid_gateway::{EndpointResolver, GatewayError, GatewayResult};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Response of `GET /gateway`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayInfo {
    /// Base WebSocket URL of the gateway
    pub url: String,
}

/// Authenticated client for the messaging REST API
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    token: String,
}

impl RestClient {
    /// Create a client for `base_url` (e.g. `https://discordapp.com/api`)
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> RestResult<Self> {
        let base_url = base_url.into();
        let parsed =
            Url::parse(&base_url).map_err(|e| RestError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RestError::InvalidBaseUrl(base_url));
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Create a client from the application configuration
    pub fn from_app_config(config: &AppConfig) -> RestResult<Self> {
        Self::new(
            config.api.base_url.clone(),
            config.bot.token.clone(),
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    /// Get the base URL (without trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the gateway URL
    pub async fn get_gateway(&self) -> RestResult<GatewayInfo> {
        let response = self.execute(self.http.get(self.url("/gateway"))).await?;
        Ok(response.json().await?)
    }

    /// Post a message to a channel
    pub async fn send_message(&self, channel_id: &str, content: &str) -> RestResult<()> {
        tracing::info!(channel_id, content, "Sending message");

        let path = format!("/channels/{}/messages", urlencoding::encode(channel_id));
        self.execute(self.http.post(self.url(&path)).json(&json!({ "content": content })))
            .await?;
        Ok(())
    }

    /// React to a message as the bot user
    pub async fn add_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> RestResult<()> {
        tracing::info!(channel_id, message_id, emoji, "Adding reaction");

        let path = format!(
            "/channels/{}/messages/{}/reactions/{}/@me",
            urlencoding::encode(channel_id),
            urlencoding::encode(message_id),
            urlencoding::encode(emoji),
        );
        self.execute(self.http.put(self.url(&path))).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, builder: RequestBuilder) -> RestResult<Response> {
        let response = builder
            .header(AUTHORIZATION, format!("Bot {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), path = %url, body = %body, "API call failed");

        Err(RestError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        })
    }
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EndpointResolver for RestClient {
    async fn resolve(&self) -> GatewayResult<String> {
        self.get_gateway()
            .await
            .map(|info| info.url)
            .map_err(|e| GatewayError::Resolve(e.to_string()))
    }
}
