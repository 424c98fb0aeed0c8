//! Delivery loop feeding decoded protocol messages to the router.

use automake_core::protocol::ProtocolMessage;
use automake_core::session::{SessionOutcome, SessionRouter};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Owns the router and processes inbound messages one at a time, in
/// arrival order.
pub struct DeliveryLoop {
    router: SessionRouter,
    outcomes: Option<mpsc::UnboundedSender<SessionOutcome>>,
}

impl DeliveryLoop {
    pub fn new(router: SessionRouter) -> Self {
        Self {
            router,
            outcomes: None,
        }
    }

    /// Forwards every session outcome to `outcomes`.
    pub fn with_outcomes(mut self, outcomes: mpsc::UnboundedSender<SessionOutcome>) -> Self {
        self.outcomes = Some(outcomes);
        self
    }

    /// Runs until `inbound` closes and returns the ids of sessions that
    /// never saw their end signal.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<ProtocolMessage>) -> Vec<Uuid> {
        tracing::debug!(
            "[DeliveryLoop] Started for workspace {}",
            self.router.workspace().id()
        );

        while let Some(message) = inbound.recv().await {
            let Some(outcome) = self.router.handle(message) else {
                continue;
            };
            if let Some(outcomes) = &self.outcomes {
                if outcomes.send(outcome).is_err() {
                    tracing::debug!("[DeliveryLoop] Outcome receiver dropped");
                }
            }
        }

        let unfinished = self.router.active_sessions();
        if !unfinished.is_empty() {
            tracing::warn!(
                "[DeliveryLoop] Inbound closed with {} unfinished session(s)",
                unfinished.len()
            );
        }
        unfinished
    }

    pub fn spawn(self, inbound: mpsc::Receiver<ProtocolMessage>) -> JoinHandle<Vec<Uuid>> {
        tokio::spawn(self.run(inbound))
    }
}
