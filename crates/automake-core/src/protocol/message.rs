use serde::{Deserialize, Serialize};

/// Kind of a compile message as sent by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum MessageKind {
    Progress,
    Error,
    Warning,
    Info,
    JpsInfo,
    Other,
    /// Any kind introduced by a newer daemon.
    Unknown,
}

impl From<String> for MessageKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PROGRESS" => Self::Progress,
            "ERROR" => Self::Error,
            "WARNING" => Self::Warning,
            "INFO" => Self::Info,
            "JPS_INFO" => Self::JpsInfo,
            "OTHER" => Self::Other,
            _ => Self::Unknown,
        }
    }
}

/// A diagnostic or progress message produced while compiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileMessage {
    pub kind: MessageKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source_file_path: Option<String>,
    /// 1-based; zero or negative means "no line".
    #[serde(default)]
    pub line: i64,
    /// 1-based; zero or negative means "no column".
    #[serde(default)]
    pub column: i64,
    /// Completion fraction for progress messages.
    #[serde(default)]
    pub done: Option<f32>,
}

impl CompileMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            source_file_path: None,
            line: 0,
            column: 0,
            done: None,
        }
    }

    pub fn progress(text: impl Into<String>, done: Option<f32>) -> Self {
        Self {
            done,
            ..Self::new(MessageKind::Progress, text)
        }
    }

    pub fn at(mut self, path: impl Into<String>, line: i64, column: i64) -> Self {
        self.source_file_path = Some(path.into());
        self.line = line;
        self.column = column;
        self
    }

    /// The completion fraction, if it is usable for determinate progress.
    pub fn done_fraction(&self) -> Option<f32> {
        self.done.filter(|fraction| *fraction >= 0.0)
    }
}

/// Session-level failure reported by the daemon connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stacktrace: Option<String>,
}

impl Failure {
    /// Description of the failure, falling back to the stack trace.
    pub fn summary(&self) -> &str {
        self.description
            .as_deref()
            .or(self.stacktrace.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_decodes() {
        let message: CompileMessage =
            serde_json::from_str(r#"{"kind":"INTERNAL_BUILDER_ERROR","text":"x"}"#).unwrap();
        assert_eq!(message.kind, MessageKind::Unknown);
        assert_eq!(message.line, 0);
        assert!(message.source_file_path.is_none());
    }

    #[test]
    fn test_known_kinds_decode() {
        let message: CompileMessage = serde_json::from_str(
            r#"{"kind":"JPS_INFO","text":"t","source_file_path":"/a.java","line":3,"column":4}"#,
        )
        .unwrap();
        assert_eq!(message.kind, MessageKind::JpsInfo);
        assert_eq!(message.source_file_path.as_deref(), Some("/a.java"));
        assert_eq!((message.line, message.column), (3, 4));
    }

    #[test]
    fn test_done_fraction() {
        assert_eq!(CompileMessage::progress("p", Some(0.5)).done_fraction(), Some(0.5));
        assert_eq!(CompileMessage::progress("p", Some(0.0)).done_fraction(), Some(0.0));
        assert_eq!(CompileMessage::progress("p", Some(-1.0)).done_fraction(), None);
        assert_eq!(CompileMessage::progress("p", None).done_fraction(), None);
    }

    #[test]
    fn test_failure_summary_fallbacks() {
        let both = Failure {
            description: Some("daemon died".to_string()),
            stacktrace: Some("at Foo".to_string()),
        };
        assert_eq!(both.summary(), "daemon died");

        let trace_only = Failure {
            description: None,
            stacktrace: Some("at Foo".to_string()),
        };
        assert_eq!(trace_only.summary(), "at Foo");

        assert_eq!(Failure::default().summary(), "");
    }
}
