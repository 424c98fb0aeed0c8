use super::category::MessageCategory;
use serde::{Deserialize, Serialize};

/// Position of a diagnostic in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Canonical locator, see [`crate::paths::local_file_url`].
    pub url: String,
    /// 1-based.
    pub line: i64,
    /// 1-based.
    pub column: i64,
}

/// A diagnostic recorded by a compile context. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    category: MessageCategory,
    text: String,
    location: Option<SourceLocation>,
}

impl DiagnosticRecord {
    pub fn new(
        category: MessageCategory,
        text: impl Into<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        Self {
            category,
            text: text.into(),
            location,
        }
    }

    pub fn category(&self) -> MessageCategory {
        self.category
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}
