//! The running portal client: one store, one guard, one API handle.
//!
//! DESIGN
//! ======
//! `Portal` owns the single [`SessionStore`] instance and hands out shared
//! references to it. Hosts drive it with [`Portal::start`] once and
//! [`Portal::navigate`] before every route change.

#[cfg(test)]
#[path = "portal_test.rs"]
mod portal_test;

use std::sync::Arc;

use reqwest::cookie::Jar;

use crate::bootstrap::{AppMode, resolve_app_mode};
use crate::config::PortalConfig;
use crate::host::{FileStorage, KeyValueStorage, MemoryStorage, Navigator, StorageError};
use crate::net::api::{HttpPortalApi, PortalApi};
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::router::{GuardDecision, NavigationGuard, Route};
use crate::state::SessionStore;

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct Portal {
    api: Arc<dyn PortalApi>,
    store: Arc<SessionStore>,
    guard: NavigationGuard,
    storage: Arc<dyn KeyValueStorage>,
}

impl Portal {
    /// Wire a portal over the real HTTP API, sharing `jar` for cookies.
    ///
    /// Storage is the JSON file named by `config.storage_path`, or memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the storage
    /// file cannot be opened.
    pub fn connect(config: PortalConfig, jar: Arc<Jar>, navigator: Arc<dyn Navigator>) -> Result<Self, PortalError> {
        let client = ApiClient::new(&config, jar)?;
        let storage: Arc<dyn KeyValueStorage> = match &config.storage_path {
            Some(path) => Arc::new(FileStorage::open(path)?),
            None => Arc::new(MemoryStorage::new()),
        };
        Ok(Self::from_parts(config, Arc::new(HttpPortalApi::new(client)), storage, navigator))
    }

    #[must_use]
    pub fn from_parts(
        config: PortalConfig,
        api: Arc<dyn PortalApi>,
        storage: Arc<dyn KeyValueStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let store = Arc::new(SessionStore::new(Arc::clone(&api), Arc::clone(&navigator)));
        let guard = NavigationGuard::new(config, Arc::clone(&store), Arc::clone(&storage), navigator);
        Self { api, store, guard, storage }
    }

    /// Read the flags document and report what to mount.
    pub async fn start(&self) -> AppMode {
        resolve_app_mode(self.api.as_ref()).await
    }

    /// Run the guard for an in-app navigation to `location`.
    pub async fn navigate(&self, location: &str) -> GuardDecision {
        self.guard.before_each(&Route::parse(location)).await
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    #[must_use]
    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }
}
