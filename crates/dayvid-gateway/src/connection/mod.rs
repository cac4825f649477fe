//! Connection state
//!
//! Per-connection session state, the handshake state machine, the heartbeat
//! scheduler and the outbound frame queue.

mod handshake;
mod heartbeat;
mod outbound;
mod session;

pub use handshake::{Handshake, HandshakeState, HelloAccepted};
pub use heartbeat::HeartbeatScheduler;
pub use outbound::{FaultSender, FrameSender};
pub use session::{SequenceProvider, SessionState};
