//! Decoded build-daemon protocol messages.
//!
//! The transport that produces these values is outside this crate; the
//! types here only describe what the router consumes.

mod event;
mod message;

pub use event::{BuildEvent, CompletionStatus, CustomBuilderMessage, GeneratedFile};
pub use message::{CompileMessage, Failure, MessageKind};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A protocol message tagged with the build session it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolMessage {
    pub session_id: Uuid,
    pub body: ProtocolBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ProtocolBody {
    BuildEvent(BuildEvent),
    CompileMessage(CompileMessage),
    Failure(Failure),
    /// Explicit end of the session, sent after everything else.
    SessionTerminated,
}

impl ProtocolMessage {
    pub fn new(session_id: Uuid, body: ProtocolBody) -> Self {
        Self { session_id, body }
    }

    pub fn build_event(session_id: Uuid, event: BuildEvent) -> Self {
        Self::new(session_id, ProtocolBody::BuildEvent(event))
    }

    pub fn compile_message(session_id: Uuid, message: CompileMessage) -> Self {
        Self::new(session_id, ProtocolBody::CompileMessage(message))
    }

    pub fn failure(session_id: Uuid, failure: Failure) -> Self {
        Self::new(session_id, ProtocolBody::Failure(failure))
    }

    pub fn session_terminated(session_id: Uuid) -> Self {
        Self::new(session_id, ProtocolBody::SessionTerminated)
    }
}
