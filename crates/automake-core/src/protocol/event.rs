use serde::{Deserialize, Serialize};

/// Lifecycle events emitted by the build daemon.
///
/// Event types this client does not know about decode to `Unknown` and are
/// ignored by the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildEvent {
    /// The daemon finished the build pass.
    BuildCompleted {
        #[serde(default)]
        completion_status: CompletionStatus,
    },
    /// Output files were written during the build.
    FilesGenerated {
        #[serde(default)]
        generated_files: Vec<GeneratedFile>,
    },
    /// Builder-specific side channel.
    CustomBuilderMessage {
        #[serde(default)]
        custom_builder_message: Option<CustomBuilderMessage>,
    },
    #[serde(other)]
    Unknown,
}

/// Final status reported with `BUILD_COMPLETED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum CompletionStatus {
    Success,
    UpToDate,
    Errors,
    Canceled,
    /// Sentinel for an absent or unknown status. Never stored as a
    /// session's build status.
    #[default]
    Unrecognized,
}

impl From<String> for CompletionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUCCESS" => Self::Success,
            "UP_TO_DATE" => Self::UpToDate,
            "ERRORS" => Self::Errors,
            "CANCELED" => Self::Canceled,
            _ => Self::Unrecognized,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub output_root: String,
    pub relative_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBuilderMessage {
    pub builder_id: String,
    pub message_type: String,
    #[serde(default)]
    pub message_text: String,
}
