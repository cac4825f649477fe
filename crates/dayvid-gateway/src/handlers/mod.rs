//! Inbound frame routing
//!
//! Routes frames by op code and hands Dispatch events to the application.

mod error;
mod router;

pub use error::{HandlerError, HandlerResult};
pub use router::{DispatchRouter, Route};

use crate::events::DispatchEvent;
use async_trait::async_trait;

/// Application logic reacting to dispatch events
///
/// Called once per Dispatch frame, in arrival order, off the receive loop.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Handle one event
    async fn handle(&self, event: DispatchEvent) -> HandlerResult<()>;
}
