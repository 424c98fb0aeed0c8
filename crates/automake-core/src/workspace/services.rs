//! Collaborator seams the automake core calls into.
//!
//! Rendering, problem tracking and subscriber delivery all live outside
//! this crate; the router only sees these traits.

use crate::compile::{CompileContext, DiagnosticRecord};
use crate::notification::Notification;
use crate::problem::Problem;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Work posted to the UI-affine execution context.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Single-threaded, FIFO execution context for UI-facing work.
pub trait UiExecutor: Send + Sync {
    /// Runs `task` later, after every previously posted task.
    fn invoke_later(&self, task: UiTask);
}

/// Progress bar and message list of the workspace's problems view.
pub trait ProblemsView: Send + Sync {
    /// `None` puts the progress into the indeterminate "busy" state.
    fn set_progress(&self, text: &str, fraction: Option<f32>);

    fn clear_progress(&self);

    fn add_message(&self, session_id: Uuid, record: &DiagnosticRecord);

    /// Drops messages from every session except `current_session`.
    fn clear_old_messages(&self, current_session: Uuid);
}

/// Long-term store of per-file problems.
pub trait ProblemTracker: Send + Sync {
    /// Registers `problems` as the current problems of `file`.
    fn report_problems(&self, file: &Path, problems: Vec<Problem>);

    /// Schedules a full re-check of `file`.
    fn queue(&self, file: &Path);
}

/// Displays and expires workspace notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, workspace_id: &str, notification: &Notification);

    fn expire(&self, notification: &Notification);
}

/// Subscribers to compilation status on the workspace's event bus.
pub trait CompilationStatusListener: Send + Sync {
    fn file_generated(&self, output_root: &str, relative_path: &str);

    fn automake_compilation_finished(
        &self,
        errors: usize,
        warnings: usize,
        context: Arc<CompileContext>,
    );
}

/// The set of collaborators bound to one workspace.
#[derive(Clone)]
pub struct WorkspaceServices {
    pub ui: Arc<dyn UiExecutor>,
    pub problems_view: Arc<dyn ProblemsView>,
    pub problem_tracker: Arc<dyn ProblemTracker>,
    pub notifier: Arc<dyn Notifier>,
    pub status_listener: Arc<dyn CompilationStatusListener>,
}
