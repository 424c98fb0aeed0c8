//! Compile context and message classification.
//!
//! - `category`: severity categories and the pure `classify` mapping
//! - `record`: immutable diagnostic records
//! - `progress`: cancellable progress indicator
//! - `context`: per-build aggregation state (`CompileContext`)

mod category;
mod context;
mod progress;
mod record;

pub use category::{MessageCategory, classify};
pub use context::CompileContext;
pub use progress::{ProgressIndicator, ProgressState};
pub use record::{DiagnosticRecord, SourceLocation};
