//! Build session domain module.
//!
//! # Module Structure
//!
//! - `model`: `BuildSession`, `BuildStatus`, `SessionState`, `SessionOutcome`
//! - `router`: the per-workspace protocol state machine (`SessionRouter`)
//!
//! # Usage
//!
//! ```ignore
//! use automake_core::session::{SessionRouter, SessionOutcome};
//!
//! let mut router = SessionRouter::new(workspace, &config);
//! if let Some(outcome) = router.handle(message) {
//!     if outcome.stale_snapshot {
//!         // schedule another build pass
//!     }
//! }
//! ```

mod model;
mod router;

pub use model::{BuildSession, BuildStatus, SessionOutcome, SessionState};
pub use router::{FAILURE_PREFIX, SessionRouter};
