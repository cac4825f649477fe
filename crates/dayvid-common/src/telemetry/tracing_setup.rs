//! Tracing and logging setup
//!
//! Installs a global `tracing` subscriber. `RUST_LOG` always wins over the
//! configured default directive.

use crate::config::Environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Quiets the HTTP and WebSocket stacks unless asked otherwise
const NOISY_DEPENDENCIES: &str =
    "hyper=warn,hyper_util=warn,reqwest=warn,tungstenite=warn,tokio_tungstenite=warn";

/// Tracing configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub directive: String,
    /// Emit one JSON object per event
    pub json: bool,
    /// Include source file and line
    pub file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            directive: with_quiet_dependencies("info"),
            json: false,
            file_line: false,
        }
    }
}

impl TracingConfig {
    /// Human-readable output, debug level for this workspace's crates
    #[must_use]
    pub fn development() -> Self {
        Self {
            directive: with_quiet_dependencies(
                "info,dayvid_gateway=debug,dayvid_rest=debug,dayvid_bot=debug",
            ),
            json: false,
            file_line: true,
        }
    }

    /// JSON output at info level
    #[must_use]
    pub fn production() -> Self {
        Self {
            json: true,
            ..Self::default()
        }
    }

    /// Pick the preset matching a deployment environment
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Staging => Self::default(),
            Environment::Production => Self::production(),
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.directive))
    }
}

fn with_quiet_dependencies(directive: &str) -> String {
    format!("{directive},{NOISY_DEPENDENCIES}")
}

/// Install the subscriber with the default configuration
///
/// # Panics
/// Panics if a global subscriber is already set.
pub fn init_tracing() {
    init_tracing_with_config(TracingConfig::default());
}

/// Install the subscriber with a custom configuration
///
/// # Panics
/// Panics if a global subscriber is already set.
pub fn init_tracing_with_config(config: TracingConfig) {
    if let Err(e) = try_init_tracing_with_config(config) {
        panic!("failed to initialize tracing: {e}");
    }
}

/// Install the subscriber with the default configuration, failing instead of
/// panicking when one is already set
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(TracingConfig::default())
}

/// Install the subscriber with a custom configuration, failing instead of
/// panicking when one is already set
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    let output = fmt::layer()
        .with_file(config.file_line)
        .with_line_number(config.file_line);
    let output = if config.json {
        output.json().boxed()
    } else {
        output.boxed()
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(output)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
