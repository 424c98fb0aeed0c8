//! "Last build" notification lifecycle.
//!
//! Each workspace holds at most one notification about the last automatic
//! build. A build that ends with errors replaces it; any other final status
//! expires it.

use crate::session::BuildStatus;
use crate::workspace::Workspace;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Notification group shown for automatic build messages.
pub const NOTIFICATION_GROUP: &str = "Compiler";

/// Text of the notification shown when an automatic build ends with errors.
pub const ERRORS_SUMMARY_TEXT: &str = "Auto build completed with errors";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Info,
    Warning,
    Error,
}

/// A workspace notification. Clones share the expiry flag.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub group: String,
    pub text: String,
    pub notification_type: NotificationType,
    /// Creation time (ISO 8601 format)
    pub created_at: String,
    #[serde(skip)]
    expired: Arc<AtomicBool>,
}

impl Notification {
    pub fn new(text: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            id: Uuid::new_v4(),
            group: NOTIFICATION_GROUP.to_string(),
            text: text.into(),
            notification_type,
            created_at: chrono::Utc::now().to_rfc3339(),
            expired: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, NotificationType::Info)
    }

    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::Acquire)
    }

    /// Marks the notification expired. Returns `false` if it already was.
    pub fn expire(&self) -> bool {
        !self.expired.swap(true, Ordering::AcqRel)
    }
}

impl PartialEq for Notification {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Applies the end-of-session notification policy to a workspace.
pub struct NotificationLifecycle;

impl NotificationLifecycle {
    /// Applies the policy for `status` and returns the notification that was
    /// created, if any.
    ///
    /// | status                            | action                             |
    /// |-----------------------------------|------------------------------------|
    /// | `Errors`                          | create, display and store a notice |
    /// | `Success`, `UpToDate`, `Canceled` | expire and clear the stored notice |
    pub fn on_session_end(
        workspace: &Arc<Workspace>,
        status: BuildStatus,
    ) -> Option<Notification> {
        if workspace.is_disposed() {
            return None;
        }

        match status {
            BuildStatus::Errors => {
                let notification = Notification::info(ERRORS_SUMMARY_TEXT);
                post_notification(workspace, &notification);
                workspace.replace_last_build_notification(Some(notification.clone()));
                Some(notification)
            }
            BuildStatus::Success | BuildStatus::UpToDate | BuildStatus::Canceled => {
                if let Some(previous) = workspace.replace_last_build_notification(None) {
                    if previous.expire() {
                        tracing::debug!(
                            "[NotificationLifecycle] Expired last build notification {} in {}",
                            previous.id,
                            workspace.id()
                        );
                        workspace.services().notifier.expire(&previous);
                    }
                }
                None
            }
        }
    }
}

/// Displays `notification` from the UI context. It is dropped there if the
/// workspace was torn down in the meantime.
pub fn post_notification(workspace: &Arc<Workspace>, notification: &Notification) {
    let workspace = Arc::clone(workspace);
    let notification = notification.clone();
    let ui = Arc::clone(&workspace.services().ui);
    ui.invoke_later(Box::new(move || {
        if workspace.is_disposed() {
            return;
        }
        tracing::info!(
            "[NotificationLifecycle] {}: {}",
            workspace.id(),
            notification.text
        );
        workspace
            .services()
            .notifier
            .notify(workspace.id(), &notification);
    }));
}
