//! # dayvid-bot
//!
//! Reacts to correct spellings of "Dayvid" and corrects everyone else.
//!
//! [`Responder`] decides what to do with a message; [`BotHandler`] plugs it
//! into the gateway and carries the decision out over REST.

mod handler;
mod responder;

pub use handler::BotHandler;
pub use responder::{david_string, Action, Responder, REACTION_EMOJIS};

use dayvid_common::AppConfig;
use dayvid_gateway::{CloseReason, ConnectionSupervisor, GatewayConfig};
use dayvid_rest::{RestClient, RestResult};
use std::future::Future;
use std::sync::Arc;

/// Connect to the gateway and answer messages until the connection ends
pub async fn run<F>(config: &AppConfig, shutdown: F) -> RestResult<CloseReason>
where
    F: Future<Output = ()>,
{
    let rest = Arc::new(RestClient::from_app_config(config)?);
    let handler = BotHandler::new(Responder::new(config.bot.username.clone()), Arc::clone(&rest));

    let supervisor = ConnectionSupervisor::new(
        GatewayConfig::from_app_config(config),
        rest,
        Arc::new(handler),
    );

    Ok(supervisor.run(shutdown).await)
}
