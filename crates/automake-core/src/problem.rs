//! Escalation of error diagnostics into the workspace's problem tracker.

use crate::workspace::Workspace;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A problem placed at a precise position in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub file: PathBuf,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
    pub descriptions: Vec<String>,
}

/// What [`ProblemEscalation::escalate`] did with a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Escalation {
    /// A located problem was registered for the file.
    Reported(Problem),
    /// The file was queued for a deferred re-check.
    Queued(PathBuf),
    /// Nothing happened: no path, or the workspace is disposed.
    Skipped,
}

pub struct ProblemEscalation;

impl ProblemEscalation {
    /// Converts an error diagnostic into a problem-tracker entry.
    ///
    /// With an existing file and positive line and column, the diagnostic
    /// becomes the file's current problem list. An unresolvable file or a
    /// missing position queues the file for a full re-check instead.
    ///
    /// Relative paths are resolved against the workspace root.
    pub fn escalate(
        workspace: &Workspace,
        file_path: Option<&str>,
        line: i64,
        column: i64,
        text: &str,
    ) -> Escalation {
        let Some(file_path) = file_path else {
            return Escalation::Skipped;
        };
        if workspace.is_disposed() {
            return Escalation::Skipped;
        }

        let tracker = &workspace.services().problem_tracker;
        let file = workspace_path(workspace.root(), Path::new(file_path));

        match (resolve_file(&file), to_position(line), to_position(column)) {
            (Some(file), Some(line), Some(column)) => {
                let problem = Problem {
                    file: file.clone(),
                    line,
                    column,
                    descriptions: vec![text.to_string()],
                };
                tracing::debug!(
                    "[ProblemEscalation] {}:{}:{} {}",
                    file.display(),
                    line,
                    column,
                    text
                );
                tracker.report_problems(&file, vec![problem.clone()]);
                Escalation::Reported(problem)
            }
            (resolved, _, _) => {
                let file = resolved.unwrap_or(file);
                tracing::debug!("[ProblemEscalation] Queued {} for re-check", file.display());
                tracker.queue(&file);
                Escalation::Queued(file)
            }
        }
    }
}

fn workspace_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn resolve_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() { Some(path.to_path_buf()) } else { None }
}

fn to_position(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|position| *position > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Harness;

    fn source_file() -> tempfile::NamedTempFile {
        tempfile::Builder::new().suffix(".java").tempfile().unwrap()
    }

    #[test]
    fn test_located_error_is_reported() {
        let harness = Harness::new();
        let file = source_file();
        let path = file.path().to_str().unwrap();

        let result = ProblemEscalation::escalate(&harness.workspace, Some(path), 10, 5, "';' expected");

        let problem = match result {
            Escalation::Reported(problem) => problem,
            other => panic!("expected a located problem, got {other:?}"),
        };
        assert_eq!((problem.line, problem.column), (10, 5));
        assert_eq!(problem.descriptions, vec!["';' expected".to_string()]);
        assert_eq!(harness.tracker.reported(), vec![(file.path().to_path_buf(), vec![problem])]);
        assert!(harness.tracker.queued().is_empty());
    }

    #[test]
    fn test_unlocated_error_is_queued() {
        let harness = Harness::new();
        let file = source_file();
        let path = file.path().to_str().unwrap();

        for (line, column) in [(0, 5), (10, 0), (-1, -1)] {
            let result = ProblemEscalation::escalate(&harness.workspace, Some(path), line, column, "x");
            assert_eq!(result, Escalation::Queued(file.path().to_path_buf()));
        }

        assert!(harness.tracker.reported().is_empty());
        assert_eq!(harness.tracker.queued().len(), 3);
    }

    #[test]
    fn test_unresolvable_file_is_queued() {
        let harness = Harness::new();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("Gone.java");

        let result = ProblemEscalation::escalate(
            &harness.workspace,
            missing.to_str(),
            10,
            5,
            "cannot find symbol",
        );

        assert_eq!(result, Escalation::Queued(missing.clone()));
        assert_eq!(harness.tracker.queued(), vec![missing]);
        assert!(harness.tracker.reported().is_empty());
    }

    #[test]
    fn test_relative_path_resolves_against_workspace_root() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("src")).unwrap();
        std::fs::write(root.path().join("src/Main.java"), "class Main {}").unwrap();
        let harness = Harness::rooted(root.path());

        let result =
            ProblemEscalation::escalate(&harness.workspace, Some("src/Main.java"), 3, 7, "x");

        let expected = root.path().join("src/Main.java");
        assert!(matches!(&result, Escalation::Reported(problem) if problem.file == expected));
        assert_eq!(harness.tracker.reported()[0].0, expected);
    }

    #[test]
    fn test_missing_relative_path_is_queued_under_root() {
        let root = tempfile::tempdir().unwrap();
        let harness = Harness::rooted(root.path());

        let result = ProblemEscalation::escalate(&harness.workspace, Some("Gone.java"), 3, 7, "x");

        assert_eq!(result, Escalation::Queued(root.path().join("Gone.java")));
    }

    #[test]
    fn test_directory_is_not_a_resolvable_file() {
        let harness = Harness::new();
        let dir = tempfile::tempdir().unwrap();

        let result =
            ProblemEscalation::escalate(&harness.workspace, dir.path().to_str(), 1, 1, "x");

        assert!(matches!(result, Escalation::Queued(_)));
    }

    #[test]
    fn test_missing_path_does_nothing() {
        let harness = Harness::new();

        let result = ProblemEscalation::escalate(&harness.workspace, None, 10, 5, "x");

        assert_eq!(result, Escalation::Skipped);
        assert!(harness.tracker.reported().is_empty());
        assert!(harness.tracker.queued().is_empty());
    }

    #[test]
    fn test_disposed_workspace_does_nothing() {
        let harness = Harness::new();
        let file = source_file();
        harness.workspace.dispose();

        let result =
            ProblemEscalation::escalate(&harness.workspace, file.path().to_str(), 10, 5, "x");

        assert_eq!(result, Escalation::Skipped);
        assert!(harness.tracker.reported().is_empty());
        assert!(harness.tracker.queued().is_empty());
    }
}
