//! Human approval gate
//!
//! One-shot rendezvous between the debate task, which waits, and whoever
//! approves or refines (UI, CLI, engine). The sender lives behind a mutex:
//! the first resolver takes it, later resolvers find it gone. A timed-out
//! wait disarms the gate, but if a resolver took the sender first its
//! decision is honored, so every wait ends in exactly one outcome.

use std::time::Duration;
use tokio::sync::{Mutex, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What the approver decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approve,
    Refine(String),
}

/// How a wait on the gate ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Decided(ApprovalDecision),
    TimedOut,
    Cancelled,
}

#[derive(Default)]
pub struct ApprovalGate {
    sender: Mutex<Option<oneshot::Sender<ApprovalDecision>>>,
}

impl ApprovalGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the gate for a new wait. Replaces any stale sender.
    pub async fn arm(&self) -> oneshot::Receiver<ApprovalDecision> {
        let (tx, rx) = oneshot::channel();
        *self.sender.lock().await = Some(tx);
        rx
    }

    pub async fn is_armed(&self) -> bool {
        self.sender.lock().await.is_some()
    }

    /// Deliver a decision. Returns `false` if the gate was not armed or
    /// another resolver got there first.
    pub async fn resolve(&self, decision: ApprovalDecision) -> bool {
        let Some(tx) = self.sender.lock().await.take() else {
            return false;
        };
        tx.send(decision).is_ok()
    }

    /// Drop the pending sender. Returns `true` if one was still there.
    pub async fn disarm(&self) -> bool {
        self.sender.lock().await.take().is_some()
    }

    /// Wait on a receiver from [`arm`](Self::arm) for at most `timeout`.
    pub async fn wait(
        &self,
        mut rx: oneshot::Receiver<ApprovalDecision>,
        timeout: Duration,
        cancellation: &CancellationToken,
    ) -> GateOutcome {
        let raced = tokio::select! {
            result = tokio::time::timeout(timeout, &mut rx) => match result {
                Ok(Ok(decision)) => return GateOutcome::Decided(decision),
                Ok(Err(_)) => return GateOutcome::Cancelled,
                Err(_) => GateOutcome::TimedOut,
            },
            _ = cancellation.cancelled() => GateOutcome::Cancelled,
        };

        if self.disarm().await {
            debug!("Approval gate disarmed: {:?}", raced);
            return raced;
        }

        // A resolver took the sender before we could disarm; its send is
        // already in flight.
        match rx.await {
            Ok(decision) => GateOutcome::Decided(decision),
            Err(_) => raced,
        }
    }
}
