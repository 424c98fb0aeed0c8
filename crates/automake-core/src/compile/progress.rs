use std::sync::{Mutex, PoisonError};
use tokio_util::sync::CancellationToken;

/// Snapshot of what the progress indicator currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressState {
    pub text: String,
    /// `None` while the indicator is in the indeterminate "busy" state.
    pub fraction: Option<f32>,
    pub running: bool,
}

impl ProgressState {
    pub fn is_indeterminate(&self) -> bool {
        self.fraction.is_none()
    }
}

/// Cancellable progress handle owned by a compile context.
///
/// Cancelling only flips the token; nothing here stops the daemon.
#[derive(Debug)]
pub struct ProgressIndicator {
    state: Mutex<ProgressState>,
    cancel: CancellationToken,
}

impl ProgressIndicator {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ProgressState {
                running: true,
                ..ProgressState::default()
            }),
            cancel: CancellationToken::new(),
        }
    }

    pub fn report(&self, text: &str, fraction: Option<f32>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.text = text.to_string();
        state.fraction = fraction;
    }

    pub fn stop(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.running = false;
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .running
    }

    pub fn is_canceled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn snapshot(&self) -> ProgressState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Token observers can wait on to learn about cancellation.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::new()
    }
}
