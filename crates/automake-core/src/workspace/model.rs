//! Workspace handle shared between the router and its collaborators.

use super::services::WorkspaceServices;
use crate::notification::Notification;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A project workspace as seen by the automake client.
///
/// Disposal can happen on any thread at any time. Every side-effecting
/// operation in this crate checks [`Workspace::is_disposed`] right before
/// acting and turns into a no-op once it returns `true`.
pub struct Workspace {
    id: String,
    root: PathBuf,
    disposed: AtomicBool,
    /// The "last build" notification slot, at most one per workspace.
    last_build_notification: Mutex<Option<Notification>>,
    services: WorkspaceServices,
}

impl Workspace {
    pub fn new(id: impl Into<String>, root: impl Into<PathBuf>, services: WorkspaceServices) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            root: root.into(),
            disposed: AtomicBool::new(false),
            last_build_notification: Mutex::new(None),
            services,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn services(&self) -> &WorkspaceServices {
        &self.services
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    pub fn is_live(&self) -> bool {
        !self.is_disposed()
    }

    /// Marks the workspace as torn down. Idempotent.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            tracing::info!("[Workspace] Disposed workspace {}", self.id);
        }
    }

    /// The notification currently stored in the "last build" slot.
    pub fn last_build_notification(&self) -> Option<Notification> {
        self.last_build_notification
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores `notification` in the "last build" slot and returns the
    /// previous occupant.
    pub(crate) fn replace_last_build_notification(
        &self,
        notification: Option<Notification>,
    ) -> Option<Notification> {
        let mut slot = self
            .last_build_notification
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, notification)
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("id", &self.id)
            .field("root", &self.root)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}
