//! UI-affine execution context backed by a single tokio task.

use automake_core::error::{AutomakeError, Result};
use automake_core::workspace::{UiExecutor, UiTask};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Runs posted tasks one at a time, in post order, on a dedicated task.
///
/// A panicking task is logged and does not stop the dispatcher.
pub struct UiDispatcher {
    sender: Mutex<Option<mpsc::UnboundedSender<UiTask>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl UiDispatcher {
    /// Spawns the dispatcher task. Must be called within a tokio runtime.
    pub fn spawn() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<UiTask>();

        let worker = tokio::spawn(async move {
            while let Some(task) = receiver.recv().await {
                if catch_unwind(AssertUnwindSafe(task)).is_err() {
                    tracing::error!("[UiDispatcher] UI task panicked");
                }
            }
            tracing::debug!("[UiDispatcher] Drained, stopping");
        });

        Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Stops accepting tasks and waits until every queued task has run.
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match worker {
            Some(worker) => worker
                .await
                .map_err(|e| AutomakeError::internal(format!("UI dispatcher failed: {}", e))),
            None => Ok(()),
        }
    }
}

impl UiExecutor for UiDispatcher {
    fn invoke_later(&self, task: UiTask) {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let delivered = sender
            .as_ref()
            .is_some_and(|sender| sender.send(task).is_ok());
        if !delivered {
            tracing::warn!("[UiDispatcher] Dropping task posted after shutdown");
        }
    }
}
