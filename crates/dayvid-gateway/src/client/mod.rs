//! Gateway client
//!
//! Configuration, endpoint resolution and the connection supervisor that ties
//! the protocol, connection and handler layers together.

mod close;
mod config;
mod endpoint;
mod supervisor;
mod writer;

pub use close::CloseReason;
pub use config::{GatewayConfig, DEFAULT_GATEWAY_VERSION};
pub use endpoint::{connect_url, EndpointResolver, StaticEndpoint, GATEWAY_ENCODING};
pub use supervisor::ConnectionSupervisor;
