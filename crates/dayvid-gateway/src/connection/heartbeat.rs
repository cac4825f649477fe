//! Heartbeat scheduler
//!
//! Sends `{op:1, d:<last sequence>}` on a fixed interval, on its own task, for
//! as long as the connection lives. Heartbeat ACKs are not tracked.

use super::{FaultSender, FrameSender, SequenceProvider};
use crate::error::{GatewayError, GatewayResult};
use crate::protocol::GatewayFrame;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Heartbeat timer bound to one connection
pub struct HeartbeatScheduler {
    outbound: FrameSender,
    faults: FaultSender,
    task: Option<JoinHandle<()>>,
}

impl HeartbeatScheduler {
    /// Create a stopped scheduler that sends through `outbound` and reports
    /// send failures on `faults`
    pub fn new(outbound: FrameSender, faults: FaultSender) -> Self {
        Self {
            outbound,
            faults,
            task: None,
        }
    }

    /// Start the timer
    ///
    /// The first heartbeat goes out one full interval after this call.
    pub fn start<P>(&mut self, interval: Duration, provider: Arc<P>) -> GatewayResult<()>
    where
        P: SequenceProvider + ?Sized + 'static,
    {
        if self.is_running() {
            return Err(GatewayError::AlreadyRunning);
        }

        tracing::debug!(interval_ms = interval.as_millis(), "Starting heartbeat");

        self.task = Some(tokio::spawn(run(
            interval,
            provider,
            self.outbound.clone(),
            self.faults.clone(),
        )));
        Ok(())
    }

    /// Cancel the timer. Stopping a stopped scheduler does nothing.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Heartbeat stopped");
        }
    }

    /// Cancel the timer and wait until the task has actually finished
    pub async fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            // Cancelled or finished: either way no heartbeat can follow
            let _ = task.await;
            tracing::debug!("Heartbeat stopped");
        }
    }

    /// Check if the timer task is alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for HeartbeatScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run<P>(period: Duration, provider: Arc<P>, outbound: FrameSender, faults: FaultSender)
where
    P: SequenceProvider + ?Sized,
{
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let seq = provider.last_sequence();
        if let Err(e) = outbound.send(GatewayFrame::heartbeat(seq)) {
            tracing::warn!(error = %e, "Failed to queue heartbeat, stopping heartbeat");
            let _ = faults.send(e);
            return;
        }

        tracing::trace!(seq = ?seq, "Heartbeat sent");
    }
}
