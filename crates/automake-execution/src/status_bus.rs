//! Broadcast bus carrying compilation status events to subscribers.

use automake_core::compile::CompileContext;
use automake_core::workspace::CompilationStatusListener;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Event delivered to bus subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompilationEvent {
    FileGenerated {
        output_root: String,
        relative_path: String,
    },
    AutomakeFinished {
        session_id: Uuid,
        errors: usize,
        warnings: usize,
        #[serde(skip)]
        context: Arc<CompileContext>,
    },
}

/// Publishes compilation status on a `tokio::sync::broadcast` channel.
///
/// Publishing with no subscribers is not an error; slow subscribers lag and
/// lose the oldest events rather than blocking the publisher.
pub struct BroadcastStatusBus {
    sender: broadcast::Sender<CompilationEvent>,
}

impl BroadcastStatusBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CompilationEvent> {
        self.sender.subscribe()
    }

    fn publish(&self, event: CompilationEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("[StatusBus] No subscribers");
        }
    }
}

impl CompilationStatusListener for BroadcastStatusBus {
    fn file_generated(&self, output_root: &str, relative_path: &str) {
        self.publish(CompilationEvent::FileGenerated {
            output_root: output_root.to_string(),
            relative_path: relative_path.to_string(),
        });
    }

    fn automake_compilation_finished(
        &self,
        errors: usize,
        warnings: usize,
        context: Arc<CompileContext>,
    ) {
        self.publish(CompilationEvent::AutomakeFinished {
            session_id: context.session_id(),
            errors,
            warnings,
            context,
        });
    }
}
