//! Integration test utilities for the gateway client and the bot
//!
//! Provides an in-process mock gateway and mock REST API so that end-to-end
//! tests run without network access.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
