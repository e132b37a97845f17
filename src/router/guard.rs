//! Navigation guard: session bootstrap plus protected-path redirects.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before every in-app route change. Protection is client-side only;
//! the API still rejects requests without a valid session cookie.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use super::route::{Route, is_local_path};
use crate::config::PortalConfig;
use crate::host::{KeyValueStorage, Navigator, REDIRECT_AFTER_LOGIN_KEY};
use crate::state::SessionStore;

/// Where the app lands when the provider round-trip did not produce a session.
pub const LOGIN_ERROR_PATH: &str = "/login-error";

/// Outcome of [`NavigationGuard::before_each`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the in-app navigation happen.
    Proceed,
    /// Drop the in-app navigation; a full-page redirect has been issued.
    Cancel,
}

pub struct NavigationGuard {
    config: PortalConfig,
    store: Arc<SessionStore>,
    storage: Arc<dyn KeyValueStorage>,
    navigator: Arc<dyn Navigator>,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(
        config: PortalConfig,
        store: Arc<SessionStore>,
        storage: Arc<dyn KeyValueStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { config, store, storage, navigator }
    }

    /// Decide whether navigation to `to` may proceed.
    ///
    /// Loads the session first whenever no user is present. A protected
    /// target without a user stores the intended path, sends the browser
    /// to the provider login and cancels.
    pub async fn before_each(&self, to: &Route) -> GuardDecision {
        if !self.store.is_authenticated().await {
            self.store.load_user().await;
        }

        if !self.config.is_protected(to.path()) || self.store.is_authenticated().await {
            return GuardDecision::Proceed;
        }

        if let Err(err) = self.storage.set(REDIRECT_AFTER_LOGIN_KEY, to.full_path()) {
            tracing::warn!(error = %err, "could not remember redirect target");
        }
        let login = self.config.login_url(to.full_path());
        tracing::info!(path = to.path(), "protected route needs a session");
        self.navigator.navigate(login.as_str());
        GuardDecision::Cancel
    }

    /// Finish the provider round-trip on `/auth/callback?next=…`.
    ///
    /// Reloads the session and returns the in-app path to continue to: `next`
    /// if it is a local path, else the remembered target, else `/`. The
    /// remembered target is consumed either way. Without a session the answer
    /// is [`LOGIN_ERROR_PATH`].
    pub async fn complete_login(&self, next: Option<&str>) -> String {
        self.store.load_user().await;

        let remembered = self.storage.get(REDIRECT_AFTER_LOGIN_KEY);
        if let Err(err) = self.storage.remove(REDIRECT_AFTER_LOGIN_KEY) {
            tracing::warn!(error = %err, "could not clear redirect target");
        }

        if !self.store.is_authenticated().await {
            tracing::warn!("login callback without a session");
            return LOGIN_ERROR_PATH.to_owned();
        }

        next.filter(|p| is_local_path(p))
            .map(str::to_owned)
            .or_else(|| remembered.filter(|p| is_local_path(p)))
            .unwrap_or_else(|| "/".to_owned())
    }
}
