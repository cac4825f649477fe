//! Gateway events
//!
//! Dispatch events as seen by application code.

mod dispatch_event;
mod event_types;

pub use dispatch_event::DispatchEvent;
pub use event_types::GatewayEventType;
