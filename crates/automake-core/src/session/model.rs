//! Build session domain model.

use crate::compile::{CompileContext, MessageCategory};
use crate::protocol::CompletionStatus;
use crate::workspace::Workspace;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Final status of a build session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    #[default]
    Success,
    UpToDate,
    Errors,
    Canceled,
}

impl BuildStatus {
    /// `None` for the "unrecognized" sentinel, which never changes a
    /// session's status.
    pub fn from_completion(status: CompletionStatus) -> Option<Self> {
        match status {
            CompletionStatus::Success => Some(Self::Success),
            CompletionStatus::UpToDate => Some(Self::UpToDate),
            CompletionStatus::Errors => Some(Self::Errors),
            CompletionStatus::Canceled => Some(Self::Canceled),
            CompletionStatus::Unrecognized => None,
        }
    }
}

/// Router state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    /// A build-completion event has been processed.
    Terminated,
}

/// One build invocation as seen by the router.
///
/// Created with the first event of a session and discarded when the
/// session-end signal has been processed.
#[derive(Debug)]
pub struct BuildSession {
    id: Uuid,
    state: SessionState,
    status: BuildStatus,
    status_recorded: bool,
    stale_snapshot: bool,
    context: Arc<CompileContext>,
}

impl BuildSession {
    pub fn new(id: Uuid, workspace: Arc<Workspace>) -> Self {
        Self {
            id,
            state: SessionState::Active,
            status: BuildStatus::default(),
            status_recorded: false,
            stale_snapshot: false,
            context: Arc::new(CompileContext::new(workspace, id)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> BuildStatus {
        self.status
    }

    /// Whether a recognized completion status has been stored.
    pub fn status_recorded(&self) -> bool {
        self.status_recorded
    }

    /// Whether the daemon reported unprocessed filesystem changes.
    pub fn stale_snapshot(&self) -> bool {
        self.stale_snapshot
    }

    pub fn context(&self) -> &Arc<CompileContext> {
        &self.context
    }

    pub(crate) fn mark_stale_snapshot(&mut self) {
        self.stale_snapshot = true;
    }

    /// Applies a build-completion status and terminates the session.
    ///
    /// The first recognized status is stored and returned. Unrecognized
    /// statuses leave the status untouched, so a recognized one may still
    /// follow. Once a status is stored, later completions change nothing.
    pub(crate) fn complete(&mut self, status: CompletionStatus) -> Option<BuildStatus> {
        self.state = SessionState::Terminated;
        if self.status_recorded {
            return None;
        }

        let status = BuildStatus::from_completion(status)?;
        self.status = status;
        self.status_recorded = true;
        Some(status)
    }

    pub fn into_outcome(self) -> SessionOutcome {
        SessionOutcome {
            session_id: self.id,
            status: self.status,
            build_completed: self.state == SessionState::Terminated,
            error_count: self.context.count(MessageCategory::Error),
            warning_count: self.context.count(MessageCategory::Warning),
            stale_snapshot: self.stale_snapshot,
        }
    }
}

/// Summary of a session handed back once its state has been discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub session_id: Uuid,
    pub status: BuildStatus,
    /// Whether a build-completion event was seen before the session ended.
    pub build_completed: bool,
    pub error_count: usize,
    pub warning_count: usize,
    /// The daemon built from a stale filesystem snapshot; another pass is
    /// warranted.
    pub stale_snapshot: bool,
}
