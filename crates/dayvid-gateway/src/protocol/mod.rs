//! Gateway protocol definitions
//!
//! Defines the wire protocol: op codes, frame format, handshake payloads,
//! close codes and the frame codec.

pub mod codec;

mod close_codes;
mod frame;
mod opcodes;
mod payloads;

pub use close_codes::CloseCode;
pub use codec::Inbound;
pub use frame::GatewayFrame;
pub use opcodes::OpCode;
pub use payloads::{HelloPayload, IdentifyPayload, IdentifyProperties};
