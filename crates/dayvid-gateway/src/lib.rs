//! # dayvid-gateway
//!
//! Gateway session client: Hello/Identify handshake, heartbeat with sequence
//! tracking, and routing of Dispatch events to application code.
//!
//! A connection is driven by [`ConnectionSupervisor`]. Application logic plugs
//! in through [`EventHandler`], and the base gateway URL comes from an
//! [`EndpointResolver`].

pub mod client;
pub mod connection;
pub mod error;
pub mod events;
pub mod handlers;
pub mod protocol;

pub use client::{
    CloseReason, ConnectionSupervisor, EndpointResolver, GatewayConfig, StaticEndpoint,
};
pub use error::{GatewayError, GatewayResult};
pub use events::{DispatchEvent, GatewayEventType};
pub use handlers::{EventHandler, HandlerError, HandlerResult};
