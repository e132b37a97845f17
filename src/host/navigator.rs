//! Full-page navigation, the `window.location.href = …` of the host.

use std::sync::{Mutex, PoisonError};

/// Leaves the current page for `url`, discarding in-app state.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Navigator that records every destination instead of leaving the page.
///
/// The CLI prints the recorded destinations; tests assert on them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.visits.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        tracing::info!(%url, "full-page navigation");
        self.visits.lock().unwrap_or_else(PoisonError::into_inner).push(url.to_owned());
    }
}
