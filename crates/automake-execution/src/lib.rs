//! Runtime for the automake session router.
//!
//! Wires a [`SessionRouter`] to a delivery task, a UI-affine dispatcher and
//! a broadcast status bus.

pub mod delivery;
pub mod headless;
pub mod logging;
pub mod status_bus;
pub mod ui_dispatcher;

pub use delivery::DeliveryLoop;
pub use status_bus::{BroadcastStatusBus, CompilationEvent};
pub use ui_dispatcher::UiDispatcher;

use automake_core::error::{AutomakeError, Result};
use automake_core::protocol::ProtocolMessage;
use automake_core::session::{SessionOutcome, SessionRouter};
use automake_core::workspace::{
    Notifier, ProblemTracker, ProblemsView, Workspace, WorkspaceServices,
};
use automake_core::AutomakeConfig;
use headless::{TracingNotifier, TracingProblemTracker, TracingProblemsView};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// The UI-side collaborators supplied by the host.
pub struct FrontEnd {
    pub problems_view: Arc<dyn ProblemsView>,
    pub problem_tracker: Arc<dyn ProblemTracker>,
    pub notifier: Arc<dyn Notifier>,
}

impl FrontEnd {
    /// Collaborators that only write to the log.
    pub fn headless() -> Self {
        Self {
            problems_view: Arc::new(TracingProblemsView),
            problem_tracker: Arc::new(TracingProblemTracker),
            notifier: Arc::new(TracingNotifier),
        }
    }
}

/// A running automake client for one workspace.
pub struct AutomakeRuntime {
    workspace: Arc<Workspace>,
    ui: Arc<UiDispatcher>,
    bus: Arc<BroadcastStatusBus>,
    inbound: mpsc::Sender<ProtocolMessage>,
    outcomes: mpsc::UnboundedReceiver<SessionOutcome>,
    delivery: JoinHandle<Vec<Uuid>>,
}

impl AutomakeRuntime {
    /// Starts a runtime with headless collaborators. Must be called within a
    /// tokio runtime.
    pub fn start(
        config: &AutomakeConfig,
        workspace_id: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self::start_with(config, workspace_id, root, FrontEnd::headless())
    }

    pub fn start_with(
        config: &AutomakeConfig,
        workspace_id: impl Into<String>,
        root: impl Into<PathBuf>,
        front_end: FrontEnd,
    ) -> Self {
        let ui = Arc::new(UiDispatcher::spawn());
        let bus = Arc::new(BroadcastStatusBus::new(config.bus.capacity));

        let services = WorkspaceServices {
            ui: ui.clone(),
            problems_view: front_end.problems_view,
            problem_tracker: front_end.problem_tracker,
            notifier: front_end.notifier,
            status_listener: bus.clone(),
        };
        let workspace = Workspace::new(workspace_id, root, services);

        let (inbound, receiver) = mpsc::channel(config.delivery.queue_capacity.max(1));
        let (outcome_sender, outcomes) = mpsc::unbounded_channel();
        let router = SessionRouter::new(workspace.clone(), config);
        let delivery = DeliveryLoop::new(router)
            .with_outcomes(outcome_sender)
            .spawn(receiver);

        tracing::info!(
            "[AutomakeRuntime] Started for workspace {} at {}",
            workspace.id(),
            workspace.root().display()
        );

        Self {
            workspace,
            ui,
            bus,
            inbound,
            outcomes,
            delivery,
        }
    }

    pub fn workspace(&self) -> &Arc<Workspace> {
        &self.workspace
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CompilationEvent> {
        self.bus.subscribe()
    }

    /// A sender transports can use to feed decoded messages.
    pub fn sender(&self) -> mpsc::Sender<ProtocolMessage> {
        self.inbound.clone()
    }

    pub async fn deliver(&self, message: ProtocolMessage) -> Result<()> {
        self.inbound
            .send(message)
            .await
            .map_err(|_| AutomakeError::channel("delivery loop has stopped"))
    }

    /// Waits for the next finished session.
    pub async fn next_outcome(&mut self) -> Option<SessionOutcome> {
        self.outcomes.recv().await
    }

    /// Stops accepting messages, finishes the ones already queued, then
    /// drains the UI dispatcher. Returns the ids of unfinished sessions.
    pub async fn shutdown(self) -> Result<Vec<Uuid>> {
        let Self {
            inbound,
            delivery,
            ui,
            ..
        } = self;
        drop(inbound);

        let unfinished = delivery
            .await
            .map_err(|e| AutomakeError::internal(format!("Delivery loop failed: {}", e)))?;
        ui.shutdown().await?;

        Ok(unfinished)
    }
}
