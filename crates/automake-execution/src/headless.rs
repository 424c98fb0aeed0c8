//! Collaborators for running without an IDE front end.
//!
//! Everything the router would show to a user is written to the log.

use automake_core::compile::{DiagnosticRecord, MessageCategory};
use automake_core::notification::Notification;
use automake_core::problem::Problem;
use automake_core::workspace::{Notifier, ProblemTracker, ProblemsView};
use std::path::Path;
use uuid::Uuid;

pub struct TracingProblemsView;

impl ProblemsView for TracingProblemsView {
    fn set_progress(&self, text: &str, fraction: Option<f32>) {
        match fraction {
            Some(fraction) => {
                tracing::debug!("[Progress] {} ({:.0}%)", text, fraction * 100.0)
            }
            None => tracing::debug!("[Progress] {}", text),
        }
    }

    fn clear_progress(&self) {
        tracing::trace!("[Progress] cleared");
    }

    fn add_message(&self, session_id: Uuid, record: &DiagnosticRecord) {
        let location = record
            .location()
            .map(|location| format!("{}:{}:{}: ", location.url, location.line, location.column))
            .unwrap_or_default();
        match record.category() {
            MessageCategory::Error => {
                tracing::error!("[Problems] {} {}{}", session_id, location, record.text())
            }
            MessageCategory::Warning => {
                tracing::warn!("[Problems] {} {}{}", session_id, location, record.text())
            }
            MessageCategory::Information => {
                tracing::info!("[Problems] {} {}{}", session_id, location, record.text())
            }
        }
    }

    fn clear_old_messages(&self, current_session: Uuid) {
        tracing::trace!("[Problems] cleared messages older than {}", current_session);
    }
}

pub struct TracingProblemTracker;

impl ProblemTracker for TracingProblemTracker {
    fn report_problems(&self, file: &Path, problems: Vec<Problem>) {
        for problem in problems {
            tracing::info!(
                "[ProblemTracker] {}:{}:{} {}",
                file.display(),
                problem.line,
                problem.column,
                problem.descriptions.join("; ")
            );
        }
    }

    fn queue(&self, file: &Path) {
        tracing::info!("[ProblemTracker] re-check queued for {}", file.display());
    }
}

pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, workspace_id: &str, notification: &Notification) {
        tracing::info!(
            "[Notification] {} [{}] {}",
            workspace_id,
            notification.group,
            notification.text
        );
    }

    fn expire(&self, notification: &Notification) {
        tracing::debug!("[Notification] expired {}", notification.id);
    }
}
