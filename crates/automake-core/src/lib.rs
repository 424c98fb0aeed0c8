//! Client-side handling of automatic builds run by an out-of-process build
//! daemon.
//!
//! The daemon streams typed protocol messages tagged with a session id. The
//! [`session::SessionRouter`] interprets that stream per session, aggregates
//! diagnostics in a [`compile::CompileContext`], escalates errors to the
//! workspace's problem tracker, and produces the right end-of-build
//! notification. The workspace can be torn down at any moment; every
//! operation re-checks [`workspace::Workspace::is_disposed`] and degrades to
//! a no-op.

pub mod compile;
pub mod config;
pub mod error;
pub mod notification;
pub mod paths;
pub mod problem;
pub mod protocol;
pub mod session;
pub mod workspace;

#[cfg(test)]
mod test_support;

// Re-export common types
pub use config::AutomakeConfig;
pub use error::{AutomakeError, Result};
pub use session::{BuildStatus, SessionOutcome, SessionRouter};
pub use workspace::{Workspace, WorkspaceServices};
