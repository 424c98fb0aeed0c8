use crate::protocol::MessageKind;
use serde::{Deserialize, Serialize};

/// Severity bucket a diagnostic is aggregated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageCategory {
    Error,
    Warning,
    Information,
}

/// Maps a protocol message kind to its aggregation category.
///
/// `None` means the kind is not a diagnostic: progress messages, and any
/// kind this client does not recognise.
pub fn classify(kind: MessageKind) -> Option<MessageCategory> {
    match kind {
        MessageKind::Error => Some(MessageCategory::Error),
        MessageKind::Warning => Some(MessageCategory::Warning),
        MessageKind::Info | MessageKind::JpsInfo | MessageKind::Other => {
            Some(MessageCategory::Information)
        }
        MessageKind::Progress | MessageKind::Unknown => None,
    }
}
