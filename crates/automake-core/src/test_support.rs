//! Recording doubles for the workspace collaborators.

use crate::compile::{CompileContext, DiagnosticRecord};
use crate::notification::Notification;
use crate::problem::Problem;
use crate::workspace::{
    CompilationStatusListener, Notifier, ProblemTracker, ProblemsView, UiExecutor, UiTask,
    Workspace, WorkspaceServices,
};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// UI executor that either runs tasks inline or holds them until
/// `run_pending` is called.
pub struct ManualUi {
    immediate: bool,
    pending: Mutex<VecDeque<UiTask>>,
}

impl ManualUi {
    pub fn run_pending(&self) {
        loop {
            let task = self.pending.lock().unwrap().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}

impl UiExecutor for ManualUi {
    fn invoke_later(&self, task: UiTask) {
        if self.immediate {
            task();
        } else {
            self.pending.lock().unwrap().push_back(task);
        }
    }
}

#[derive(Default)]
pub struct RecordingView {
    progress: Mutex<Vec<(String, Option<f32>)>>,
    messages: Mutex<Vec<(Uuid, DiagnosticRecord)>>,
    progress_clears: Mutex<usize>,
    kept_sessions: Mutex<Vec<Uuid>>,
}

impl RecordingView {
    pub fn progress(&self) -> Vec<(String, Option<f32>)> {
        self.progress.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<(Uuid, DiagnosticRecord)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn progress_clears(&self) -> usize {
        *self.progress_clears.lock().unwrap()
    }

    pub fn kept_sessions(&self) -> Vec<Uuid> {
        self.kept_sessions.lock().unwrap().clone()
    }
}

impl ProblemsView for RecordingView {
    fn set_progress(&self, text: &str, fraction: Option<f32>) {
        self.progress
            .lock()
            .unwrap()
            .push((text.to_string(), fraction));
    }

    fn clear_progress(&self) {
        *self.progress_clears.lock().unwrap() += 1;
    }

    fn add_message(&self, session_id: Uuid, record: &DiagnosticRecord) {
        self.messages
            .lock()
            .unwrap()
            .push((session_id, record.clone()));
    }

    fn clear_old_messages(&self, current_session: Uuid) {
        self.kept_sessions.lock().unwrap().push(current_session);
    }
}

#[derive(Default)]
pub struct RecordingTracker {
    reported: Mutex<Vec<(PathBuf, Vec<Problem>)>>,
    queued: Mutex<Vec<PathBuf>>,
}

impl RecordingTracker {
    pub fn reported(&self) -> Vec<(PathBuf, Vec<Problem>)> {
        self.reported.lock().unwrap().clone()
    }

    pub fn queued(&self) -> Vec<PathBuf> {
        self.queued.lock().unwrap().clone()
    }
}

impl ProblemTracker for RecordingTracker {
    fn report_problems(&self, file: &Path, problems: Vec<Problem>) {
        self.reported
            .lock()
            .unwrap()
            .push((file.to_path_buf(), problems));
    }

    fn queue(&self, file: &Path) {
        self.queued.lock().unwrap().push(file.to_path_buf());
    }
}

type NotifyHook = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct RecordingNotifier {
    shown: Mutex<Vec<Notification>>,
    expired: Mutex<Vec<Uuid>>,
    on_notify: Mutex<Option<NotifyHook>>,
}

impl RecordingNotifier {
    /// Runs `hook` after each notification is recorded.
    pub fn set_on_notify(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.on_notify.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn shown_texts(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|notification| notification.text.clone())
            .collect()
    }

    pub fn expired_ids(&self) -> Vec<Uuid> {
        self.expired.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, _workspace_id: &str, notification: &Notification) {
        self.shown.lock().unwrap().push(notification.clone());
        if let Some(hook) = self.on_notify.lock().unwrap().as_ref() {
            hook();
        }
    }

    fn expire(&self, notification: &Notification) {
        self.expired.lock().unwrap().push(notification.id);
    }
}

#[derive(Default)]
pub struct RecordingListener {
    generated: Mutex<Vec<(String, String)>>,
    finished: Mutex<Vec<(usize, usize, Uuid)>>,
}

impl RecordingListener {
    pub fn generated(&self) -> Vec<(String, String)> {
        self.generated.lock().unwrap().clone()
    }

    /// `(errors, warnings, session id of the context)` per publication.
    pub fn finished(&self) -> Vec<(usize, usize, Uuid)> {
        self.finished.lock().unwrap().clone()
    }
}

impl CompilationStatusListener for RecordingListener {
    fn file_generated(&self, output_root: &str, relative_path: &str) {
        self.generated
            .lock()
            .unwrap()
            .push((output_root.to_string(), relative_path.to_string()));
    }

    fn automake_compilation_finished(
        &self,
        errors: usize,
        warnings: usize,
        context: Arc<CompileContext>,
    ) {
        self.finished
            .lock()
            .unwrap()
            .push((errors, warnings, context.session_id()));
    }
}

/// A workspace wired to recording collaborators.
pub struct Harness {
    pub workspace: Arc<Workspace>,
    pub ui: Arc<ManualUi>,
    pub view: Arc<RecordingView>,
    pub tracker: Arc<RecordingTracker>,
    pub notifier: Arc<RecordingNotifier>,
    pub listener: Arc<RecordingListener>,
}

impl Harness {
    /// UI tasks run inline.
    pub fn new() -> Self {
        Self::build(true, Path::new("/tmp/ws-test"))
    }

    /// UI tasks wait for `ui.run_pending()`.
    pub fn deferred() -> Self {
        Self::build(false, Path::new("/tmp/ws-test"))
    }

    /// UI tasks run inline; the workspace lives at `root`.
    pub fn rooted(root: &Path) -> Self {
        Self::build(true, root)
    }

    fn build(immediate: bool, root: &Path) -> Self {
        let ui = Arc::new(ManualUi {
            immediate,
            pending: Mutex::new(VecDeque::new()),
        });
        let view = Arc::new(RecordingView::default());
        let tracker = Arc::new(RecordingTracker::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let listener = Arc::new(RecordingListener::default());

        let services = WorkspaceServices {
            ui: ui.clone(),
            problems_view: view.clone(),
            problem_tracker: tracker.clone(),
            notifier: notifier.clone(),
            status_listener: listener.clone(),
        };

        Self {
            workspace: Workspace::new("ws-test", root, services),
            ui,
            view,
            tracker,
            notifier,
            listener,
        }
    }

    pub fn context(&self) -> CompileContext {
        CompileContext::new(self.workspace.clone(), Uuid::new_v4())
    }
}
