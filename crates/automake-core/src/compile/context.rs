use super::category::MessageCategory;
use super::progress::ProgressIndicator;
use super::record::{DiagnosticRecord, SourceLocation};
use crate::workspace::Workspace;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

/// Per-build aggregation state: message counters by category, the ordered
/// message log, and the cancellable progress indicator.
///
/// Mutation happens on the delivery task only. UI code may read at any
/// time and sees an eventually consistent view.
#[derive(Debug)]
pub struct CompileContext {
    workspace: Arc<Workspace>,
    session_id: Uuid,
    counts: Mutex<HashMap<MessageCategory, usize>>,
    messages: Mutex<Vec<DiagnosticRecord>>,
    progress: ProgressIndicator,
}

impl CompileContext {
    pub fn new(workspace: Arc<Workspace>, session_id: Uuid) -> Self {
        Self {
            workspace,
            session_id,
            counts: Mutex::new(HashMap::new()),
            messages: Mutex::new(Vec::new()),
            progress: ProgressIndicator::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn workspace(&self) -> &Arc<Workspace> {
        &self.workspace
    }

    /// Records a diagnostic and bumps its category counter.
    ///
    /// Returns `None` without recording anything once the workspace is
    /// disposed.
    pub fn record_diagnostic(
        &self,
        category: MessageCategory,
        text: &str,
        location: Option<SourceLocation>,
    ) -> Option<DiagnosticRecord> {
        if self.workspace.is_disposed() {
            return None;
        }

        let record = DiagnosticRecord::new(category, text, location);
        *self
            .counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(category)
            .or_insert(0) += 1;
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());

        Some(record)
    }

    pub fn count(&self, category: MessageCategory) -> usize {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&category)
            .copied()
            .unwrap_or(0)
    }

    /// Every recorded diagnostic, in recording order.
    pub fn messages(&self) -> Vec<DiagnosticRecord> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages_of(&self, category: MessageCategory) -> Vec<DiagnosticRecord> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|record| record.category() == category)
            .cloned()
            .collect()
    }

    /// Determinate progress with `Some(fraction)`, indeterminate otherwise.
    pub fn report_progress(&self, text: &str, fraction: Option<f32>) {
        if self.workspace.is_disposed() {
            return;
        }
        self.progress.report(text, fraction);
        self.workspace
            .services()
            .problems_view
            .set_progress(text, fraction);
    }

    pub fn stop_progress(&self) {
        if self.workspace.is_disposed() {
            return;
        }
        self.progress.stop();
    }

    pub fn cancel_progress(&self) {
        if self.workspace.is_disposed() {
            return;
        }
        self.progress.cancel();
    }

    pub fn progress(&self) -> &ProgressIndicator {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Harness;

    #[test]
    fn test_record_counts_by_category() {
        let harness = Harness::new();
        let context = harness.context();

        context.record_diagnostic(MessageCategory::Error, "e1", None);
        context.record_diagnostic(MessageCategory::Error, "e2", None);
        context.record_diagnostic(MessageCategory::Warning, "w1", None);

        assert_eq!(context.count(MessageCategory::Error), 2);
        assert_eq!(context.count(MessageCategory::Warning), 1);
        assert_eq!(context.count(MessageCategory::Information), 0);
    }

    #[test]
    fn test_messages_keep_order() {
        let harness = Harness::new();
        let context = harness.context();

        context.record_diagnostic(MessageCategory::Warning, "first", None);
        context.record_diagnostic(MessageCategory::Error, "second", None);
        context.record_diagnostic(MessageCategory::Warning, "third", None);

        let texts: Vec<_> = context
            .messages()
            .iter()
            .map(|record| record.text().to_string())
            .collect();
        assert_eq!(texts, ["first", "second", "third"]);
        assert_eq!(context.messages_of(MessageCategory::Warning).len(), 2);
    }

    #[test]
    fn test_record_returns_location() {
        let harness = Harness::new();
        let context = harness.context();
        let location = SourceLocation {
            url: "file:///src/A.java".to_string(),
            line: 3,
            column: 7,
        };

        let record = context
            .record_diagnostic(MessageCategory::Error, "boom", Some(location.clone()))
            .unwrap();
        assert_eq!(record.location(), Some(&location));
        assert_eq!(record.category(), MessageCategory::Error);
    }

    #[test]
    fn test_disposed_workspace_records_nothing() {
        let harness = Harness::new();
        let context = harness.context();
        harness.workspace.dispose();

        assert!(
            context
                .record_diagnostic(MessageCategory::Error, "late", None)
                .is_none()
        );
        assert_eq!(context.count(MessageCategory::Error), 0);
        assert!(context.messages().is_empty());
    }

    #[test]
    fn test_progress_forwards_to_view() {
        let harness = Harness::new();
        let context = harness.context();

        context.report_progress("Compiling", Some(0.5));
        context.report_progress("Parsing", None);

        assert_eq!(
            harness.view.progress(),
            vec![
                ("Compiling".to_string(), Some(0.5)),
                ("Parsing".to_string(), None)
            ]
        );
        assert!(context.progress().snapshot().is_indeterminate());
    }

    #[test]
    fn test_progress_is_noop_after_dispose() {
        let harness = Harness::new();
        let context = harness.context();
        harness.workspace.dispose();

        context.report_progress("Compiling", Some(0.5));
        context.stop_progress();
        context.cancel_progress();

        assert!(harness.view.progress().is_empty());
        assert!(context.progress().is_running());
        assert!(!context.progress().is_canceled());
    }
}
