//! Per-connection session state
//!
//! The only state shared between the receive loop and the heartbeat task.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Read access to the last observed sequence number
///
/// Handed to the heartbeat scheduler so it can read the sequence at each tick
/// without knowing about the rest of the session.
pub trait SequenceProvider: Send + Sync {
    /// The most recent sequence number, `None` if none was seen yet
    fn last_sequence(&self) -> Option<u64>;
}

/// Mutable state of one gateway connection
///
/// Created fresh for every connection; nothing survives a reconnect.
#[derive(Debug)]
pub struct SessionState {
    /// Last sequence number seen on an inbound frame
    last_sequence: Mutex<Option<u64>>,

    /// Heartbeat interval from Hello, in milliseconds
    heartbeat_interval_ms: OnceLock<u64>,

    /// Whether the first Dispatch after Identify has arrived
    handshake_complete: AtomicBool,
}

impl SessionState {
    /// Create a new, empty session
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            last_sequence: Mutex::new(None),
            heartbeat_interval_ms: OnceLock::new(),
            handshake_complete: AtomicBool::new(false),
        })
    }

    /// Get the last sequence number
    pub fn last_sequence(&self) -> Option<u64> {
        *self.last_sequence.lock()
    }

    /// Replace the last sequence number
    ///
    /// Last write wins; the server guarantees sequences never decrease.
    pub fn set_last_sequence(&self, seq: u64) {
        *self.last_sequence.lock() = Some(seq);
    }

    /// Get the heartbeat interval, once Hello has been processed
    pub fn heartbeat_interval(&self) -> Option<Duration> {
        self.heartbeat_interval_ms
            .get()
            .copied()
            .map(Duration::from_millis)
    }

    /// Record the heartbeat interval
    ///
    /// Returns `false` and leaves the stored value untouched if an interval
    /// was already recorded on this connection.
    pub fn set_heartbeat_interval(&self, interval_ms: u64) -> bool {
        self.heartbeat_interval_ms.set(interval_ms).is_ok()
    }

    /// Check if the handshake has completed
    pub fn is_handshake_complete(&self) -> bool {
        self.handshake_complete.load(Ordering::Acquire)
    }

    /// Mark the handshake complete
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn mark_handshake_complete(&self) -> bool {
        self.handshake_complete
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl SequenceProvider for SessionState {
    fn last_sequence(&self) -> Option<u64> {
        SessionState::last_sequence(self)
    }
}
