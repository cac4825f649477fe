//! # dayvid-rest
//!
//! Thin REST client for the calls the bot needs: gateway discovery, sending a
//! message and adding a reaction.

mod client;
mod error;

pub use client::{GatewayInfo, RestClient};
pub use error::{RestError, RestResult};
