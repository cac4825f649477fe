//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file, if present).

use std::env;
use std::fmt;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub bot: BotConfig,
    pub api: ApiConfig,
    pub gateway: GatewaySettings,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Service name, attached to the startup log
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Bot identity
#[derive(Clone)]
pub struct BotConfig {
    /// Bot token, sent in Identify and as the REST `Authorization` header
    pub token: String,
    /// Username of the bot itself; its own messages are never answered
    pub username: String,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// REST API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Gateway connection settings
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub version: u8,
    pub large_threshold: u32,
}

// Default value functions
fn default_app_name() -> String {
    "dayvid".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_bot_username() -> String {
    "DayvidBot".to_string()
}

fn default_api_base_url() -> String {
    "https://discordapp.com/api".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_gateway_version() -> u8 {
    6
}

fn default_large_threshold() -> u32 {
    250
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or unparsable
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(value) => Environment::parse(&value)
                .ok_or(ConfigError::InvalidValue("APP_ENV", value))?,
            None => default_env(),
        };

        let token = lookup("TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar("TOKEN"))?;

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            bot: BotConfig {
                token,
                username: lookup("BOT_USERNAME").unwrap_or_else(default_bot_username),
            },
            api: ApiConfig {
                base_url: lookup("API_BASE_URL").unwrap_or_else(default_api_base_url),
                timeout_secs: parse_or(&lookup, "HTTP_TIMEOUT_SECS", default_http_timeout_secs)?,
            },
            gateway: GatewaySettings {
                version: parse_or(&lookup, "GATEWAY_VERSION", default_gateway_version)?,
                large_threshold: parse_or(
                    &lookup,
                    "GATEWAY_LARGE_THRESHOLD",
                    default_large_threshold,
                )?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
