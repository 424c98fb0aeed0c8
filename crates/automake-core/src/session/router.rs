use super::model::{BuildSession, BuildStatus, SessionOutcome};
use crate::compile::{DiagnosticRecord, MessageCategory, SourceLocation, classify};
use crate::config::{AutomakeConfig, StaleSnapshotSignal};
use crate::notification::{Notification, NotificationLifecycle, post_notification};
use crate::paths::{local_file_url, to_system_independent_name};
use crate::problem::ProblemEscalation;
use crate::protocol::{
    BuildEvent, CompileMessage, CompletionStatus, CustomBuilderMessage, Failure, GeneratedFile,
    MessageKind, ProtocolBody, ProtocolMessage,
};
use crate::workspace::Workspace;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Prefix of the diagnostic synthesized from a protocol-level failure.
pub const FAILURE_PREFIX: &str = "Auto build failure: ";

/// Interprets the ordered protocol stream of automatic builds in one
/// workspace.
///
/// Every handler re-checks workspace disposal first and does nothing once
/// the workspace is gone.
pub struct SessionRouter {
    workspace: Arc<Workspace>,
    stale_snapshot_signal: StaleSnapshotSignal,
    sessions: HashMap<Uuid, BuildSession>,
}

impl SessionRouter {
    pub fn new(workspace: Arc<Workspace>, config: &AutomakeConfig) -> Self {
        Self::with_signal(workspace, config.stale_snapshot.clone())
    }

    pub fn with_signal(workspace: Arc<Workspace>, stale_snapshot_signal: StaleSnapshotSignal) -> Self {
        Self {
            workspace,
            stale_snapshot_signal,
            sessions: HashMap::new(),
        }
    }

    pub fn workspace(&self) -> &Arc<Workspace> {
        &self.workspace
    }

    pub fn session(&self, session_id: Uuid) -> Option<&BuildSession> {
        self.sessions.get(&session_id)
    }

    /// Ids of sessions that have not seen their end signal yet.
    pub fn active_sessions(&self) -> Vec<Uuid> {
        self.sessions.keys().copied().collect()
    }

    /// Routes one protocol message. Returns the outcome when the message
    /// ended its session.
    pub fn handle(&mut self, message: ProtocolMessage) -> Option<SessionOutcome> {
        let ProtocolMessage { session_id, body } = message;
        match body {
            ProtocolBody::BuildEvent(event) => {
                self.handle_build_event(session_id, &event);
                None
            }
            ProtocolBody::CompileMessage(message) => {
                self.handle_compile_message(session_id, &message);
                None
            }
            ProtocolBody::Failure(failure) => {
                self.handle_failure(session_id, &failure);
                None
            }
            ProtocolBody::SessionTerminated => self.session_terminated(session_id),
        }
    }

    pub fn handle_build_event(&mut self, session_id: Uuid, event: &BuildEvent) {
        if self.workspace.is_disposed() {
            return;
        }

        match event {
            BuildEvent::BuildCompleted { completion_status } => {
                self.on_build_completed(session_id, *completion_status)
            }
            BuildEvent::FilesGenerated { generated_files } => {
                self.on_files_generated(session_id, generated_files)
            }
            BuildEvent::CustomBuilderMessage {
                custom_builder_message,
            } => self.on_custom_message(session_id, custom_builder_message.as_ref()),
            BuildEvent::Unknown => {
                tracing::debug!("[SessionRouter] {} ignoring unknown build event", session_id);
            }
        }
    }

    pub fn handle_compile_message(&mut self, session_id: Uuid, message: &CompileMessage) {
        if self.workspace.is_disposed() {
            return;
        }
        let context = Arc::clone(self.session_mut(session_id).context());

        let Some(category) = classify(message.kind) else {
            if message.kind == MessageKind::Progress {
                context.report_progress(&message.text, message.done_fraction());
            } else {
                tracing::debug!(
                    "[SessionRouter] {} dropping message of kind {:?}",
                    session_id,
                    message.kind
                );
            }
            return;
        };

        let location = message
            .source_file_path
            .as_deref()
            .map(|path| SourceLocation {
                url: local_file_url(path),
                line: message.line,
                column: message.column,
            });
        let record = context.record_diagnostic(category, &message.text, location);

        if message.kind == MessageKind::Error {
            ProblemEscalation::escalate(
                &self.workspace,
                message.source_file_path.as_deref(),
                message.line,
                message.column,
                &message.text,
            );
        }

        if matches!(message.kind, MessageKind::Error | MessageKind::JpsInfo) {
            if let Some(record) = record {
                if self.workspace.is_live() {
                    self.workspace
                        .services()
                        .problems_view
                        .add_message(session_id, &record);
                }
            }
        }
    }

    /// Surfaces a daemon-side failure as an error diagnostic and a
    /// notification. Does not change session state.
    pub fn handle_failure(&mut self, session_id: Uuid, failure: &Failure) {
        if self.workspace.is_disposed() {
            return;
        }
        self.session_mut(session_id);

        let text = format!("{}{}", FAILURE_PREFIX, failure.summary());
        tracing::warn!("[SessionRouter] {} {}", session_id, text);

        post_notification(&self.workspace, &Notification::info(text.as_str()));
        if self.workspace.is_disposed() {
            return;
        }
        let record = DiagnosticRecord::new(MessageCategory::Error, text, None);
        self.workspace
            .services()
            .problems_view
            .add_message(session_id, &record);
    }

    /// Ends a session: applies the notification policy, clears transient
    /// UI state and discards the session.
    ///
    /// Returns `None` when the workspace is already disposed.
    pub fn session_terminated(&mut self, session_id: Uuid) -> Option<SessionOutcome> {
        let session = self
            .sessions
            .remove(&session_id)
            .unwrap_or_else(|| BuildSession::new(session_id, Arc::clone(&self.workspace)));

        if self.workspace.is_disposed() {
            tracing::debug!(
                "[SessionRouter] {} ended after workspace {} was disposed",
                session_id,
                self.workspace.id()
            );
            return None;
        }

        NotificationLifecycle::on_session_end(&self.workspace, session.status());

        if self.workspace.is_live() {
            let view = &self.workspace.services().problems_view;
            view.clear_progress();
            view.clear_old_messages(session_id);
        }

        let outcome = session.into_outcome();
        tracing::info!(
            "[SessionRouter] {} terminated: status={:?} errors={} warnings={} stale_snapshot={}",
            session_id,
            outcome.status,
            outcome.error_count,
            outcome.warning_count,
            outcome.stale_snapshot
        );
        Some(outcome)
    }

    fn on_build_completed(&mut self, session_id: Uuid, completion_status: CompletionStatus) {
        let session = self.session_mut(session_id);
        let context = Arc::clone(session.context());
        let status_recorded = session.status_recorded();

        context.stop_progress();
        if status_recorded {
            tracing::warn!(
                "[SessionRouter] {} ignoring repeated build completion ({:?})",
                session_id,
                completion_status
            );
            return;
        }

        if session.complete(completion_status) == Some(BuildStatus::Canceled) {
            context.cancel_progress();
        }

        let errors = context.count(MessageCategory::Error);
        let warnings = context.count(MessageCategory::Warning);
        tracing::debug!(
            "[SessionRouter] {} build completed ({:?}), errors={} warnings={}",
            session_id,
            completion_status,
            errors,
            warnings
        );

        let workspace = Arc::clone(&self.workspace);
        let ui = Arc::clone(&workspace.services().ui);
        ui.invoke_later(Box::new(move || {
            if workspace.is_disposed() {
                return;
            }
            workspace
                .services()
                .status_listener
                .automake_compilation_finished(errors, warnings, context);
        }));
    }

    fn on_files_generated(&mut self, session_id: Uuid, generated_files: &[GeneratedFile]) {
        self.session_mut(session_id);
        let listener = &self.workspace.services().status_listener;
        for file in generated_files {
            if self.workspace.is_disposed() {
                return;
            }
            let root = to_system_independent_name(&file.output_root);
            let relative_path = to_system_independent_name(&file.relative_path);
            listener.file_generated(&root, &relative_path);
        }
    }

    fn on_custom_message(&mut self, session_id: Uuid, message: Option<&CustomBuilderMessage>) {
        let signal_matches = message.is_some_and(|message| {
            self.stale_snapshot_signal
                .matches(&message.builder_id, &message.message_type)
        });
        let session = self.session_mut(session_id);
        if signal_matches {
            tracing::info!(
                "[SessionRouter] {} daemon reported unprocessed filesystem changes",
                session_id
            );
            session.mark_stale_snapshot();
        }
    }

    fn session_mut(&mut self, session_id: Uuid) -> &mut BuildSession {
        let workspace = &self.workspace;
        self.sessions.entry(session_id).or_insert_with(|| {
            tracing::debug!("[SessionRouter] {} started", session_id);
            BuildSession::new(session_id, Arc::clone(workspace))
        })
    }
}
