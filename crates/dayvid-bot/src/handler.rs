//! Gateway event handler

use crate::responder::{Action, Responder};
use async_trait::async_trait;
use dayvid_gateway::{DispatchEvent, EventHandler, HandlerError, HandlerResult};
use dayvid_rest::RestClient;
use std::sync::Arc;

/// Answers messages through the REST API
pub struct BotHandler {
    responder: Responder,
    rest: Arc<RestClient>,
}

impl BotHandler {
    pub fn new(responder: Responder, rest: Arc<RestClient>) -> Self {
        Self { responder, rest }
    }

    async fn perform(&self, action: Action) -> HandlerResult<()> {
        match action {
            Action::React {
                channel_id,
                message_id,
                emoji,
            } => self.rest.add_reaction(&channel_id, &message_id, emoji).await,
            Action::Reply {
                channel_id,
                content,
            } => self.rest.send_message(&channel_id, &content).await,
        }
        .map_err(HandlerError::source)
    }
}

#[async_trait]
impl EventHandler for BotHandler {
    async fn handle(&self, event: DispatchEvent) -> HandlerResult<()> {
        let action = self.responder.respond(&event, &mut rand::thread_rng());

        match action {
            Some(action) => {
                tracing::debug!(seq = ?event.sequence, action = ?action, "Responding to message");
                self.perform(action).await
            }
            None => Ok(()),
        }
    }
}
