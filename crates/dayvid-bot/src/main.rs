//! Dayvid bot entry point
//!
//! Run with:
//! ```bash
//! TOKEN=... cargo run -p dayvid-bot
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use dayvid_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Bot stopped with an error");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        username = %config.bot.username,
        api = %config.api.base_url,
        "Starting Dayvid bot..."
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    let reason = dayvid_bot::run(&config, shutdown).await?;

    match reason {
        dayvid_gateway::CloseReason::Failed(e) => Err(e.into()),
        reason => {
            info!(reason = %reason, "Bot stopped");
            Ok(())
        }
    }
}
