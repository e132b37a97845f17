//! Session store: the current user plus the user's review and favorite lists.
//!
//! DESIGN
//! ======
//! Read actions (`load_user`, list loads) feed ambient UI state, so they never
//! fail: any error degrades to "no user" or an empty page and is only logged.
//! `update_profile` and the favorite toggles return their errors because a
//! form has to show them. `logout` is best-effort on the server and always
//! clears local state.
//!
//! CONCURRENCY
//! ===========
//! Each slot (user, reviews, favorites) has a request counter. A load takes a
//! ticket before its network call and only writes if the ticket is still the
//! newest when the response arrives, so overlapping loads settle on the
//! latest one issued. The state lock is never held across a network await.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use super::avatar::CacheBuster;
use super::lists::{ListKind, ListPage};
use crate::host::Navigator;
use crate::net::api::PortalApi;
use crate::net::error::ApiError;
use crate::net::types::{PageQuery, ProfileInput, ProfileUpdate, User};

// =============================================================================
// SESSION STATE
// =============================================================================

/// What the client knows about who is logged in.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    /// No load has completed yet.
    #[default]
    Unknown,
    /// The last load or a logout established there is no session.
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Unknown | Self::Anonymous => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[derive(Default)]
struct StoreState {
    session: SessionState,
    reviews: ListPage,
    favorites: ListPage,
}

impl StoreState {
    fn list_mut(&mut self, kind: ListKind) -> &mut ListPage {
        match kind {
            ListKind::Reviews => &mut self.reviews,
            ListKind::Favorites => &mut self.favorites,
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

pub struct SessionStore {
    api: Arc<dyn PortalApi>,
    navigator: Arc<dyn Navigator>,
    avatars: CacheBuster,
    state: RwLock<StoreState>,
    user_seq: AtomicU64,
    reviews_seq: AtomicU64,
    favorites_seq: AtomicU64,
}

impl SessionStore {
    #[must_use]
    pub fn new(api: Arc<dyn PortalApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            avatars: CacheBuster::new(),
            state: RwLock::new(StoreState::default()),
            user_seq: AtomicU64::new(0),
            reviews_seq: AtomicU64::new(0),
            favorites_seq: AtomicU64::new(0),
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub async fn session(&self) -> SessionState {
        self.state.read().await.session.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.session.user().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.session.is_authenticated()
    }

    pub async fn reviews(&self) -> ListPage {
        self.state.read().await.reviews.clone()
    }

    pub async fn favorites(&self) -> ListPage {
        self.state.read().await.favorites.clone()
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Ask the server who is logged in. Never fails; on any error the session
    /// becomes [`SessionState::Anonymous`].
    pub async fn load_user(&self) {
        let ticket = begin(&self.user_seq);
        let next = match self.api.fetch_me().await {
            Ok(mut user) => {
                self.avatars.apply(&mut user);
                SessionState::Authenticated(user)
            }
            Err(err) if err.is_unauthorized() => {
                tracing::debug!(error = %err, "no active session");
                SessionState::Anonymous
            }
            Err(err) => {
                tracing::warn!(error = %err, "session load failed");
                SessionState::Anonymous
            }
        };

        let mut state = self.state.write().await;
        if !is_current(&self.user_seq, ticket) {
            tracing::debug!(ticket, "discarding stale session load");
            return;
        }
        state.session = next;
    }

    pub async fn load_my_reviews(&self, query: PageQuery) {
        self.load_list(ListKind::Reviews, query).await;
    }

    pub async fn load_my_favorites(&self, query: PageQuery) {
        self.load_list(ListKind::Favorites, query).await;
    }

    async fn load_list(&self, kind: ListKind, query: PageQuery) {
        let seq = self.list_seq(kind);
        let ticket = begin(seq);
        let result = match kind {
            ListKind::Reviews => self.api.list_my_reviews(query).await,
            ListKind::Favorites => self.api.list_my_favorites(query).await,
        };
        let page = match result {
            Ok(body) => ListPage::from_response(&body, kind),
            Err(err) => {
                tracing::warn!(list = kind.items_key(), page = query.page, error = %err, "list load failed");
                ListPage::default()
            }
        };

        let mut state = self.state.write().await;
        if !is_current(seq, ticket) {
            tracing::debug!(list = kind.items_key(), ticket, "discarding stale list load");
            return;
        }
        *state.list_mut(kind) = page;
    }

    /// Send a partial profile update and adopt the user the server returns.
    ///
    /// The returned user is only stored if no logout or newer session load
    /// happened while the request was in flight.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from `PUT /me`; the session is left untouched.
    pub async fn update_profile(&self, input: ProfileInput) -> Result<User, ApiError> {
        let update = ProfileUpdate::from(input);
        let ticket = begin(&self.user_seq);
        let mut user = match self.api.update_me(&update).await {
            Ok(user) => user,
            Err(err) => {
                tracing::error!(error = %err, "profile update failed");
                return Err(err);
            }
        };
        self.avatars.apply(&mut user);

        let mut state = self.state.write().await;
        if is_current(&self.user_seq, ticket) {
            state.session = SessionState::Authenticated(user.clone());
        } else {
            tracing::debug!(ticket, "session changed during profile update; keeping it");
        }
        Ok(user)
    }

    /// End the session, drop the user's lists and leave for `/`.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            tracing::warn!(error = %err, "logout request failed");
        }

        begin(&self.user_seq);
        begin(&self.reviews_seq);
        begin(&self.favorites_seq);
        *self.state.write().await = StoreState { session: SessionState::Anonymous, ..StoreState::default() };
        self.navigator.navigate("/");
    }

    /// # Errors
    ///
    /// Returns the [`ApiError`] from `PUT /sites/{id}/favorite`.
    pub async fn add_favorite(&self, site_id: i64) -> Result<(), ApiError> {
        self.api.add_favorite(site_id).await.inspect_err(|err| {
            tracing::error!(site_id, error = %err, "adding favorite failed");
        })
    }

    /// # Errors
    ///
    /// Returns the [`ApiError`] from `DELETE /sites/{id}/favorite`.
    pub async fn remove_favorite(&self, site_id: i64) -> Result<(), ApiError> {
        self.api.remove_favorite(site_id).await.inspect_err(|err| {
            tracing::error!(site_id, error = %err, "removing favorite failed");
        })
    }

    fn list_seq(&self, kind: ListKind) -> &AtomicU64 {
        match kind {
            ListKind::Reviews => &self.reviews_seq,
            ListKind::Favorites => &self.favorites_seq,
        }
    }
}

fn begin(seq: &AtomicU64) -> u64 {
    seq.fetch_add(1, Ordering::SeqCst) + 1
}

fn is_current(seq: &AtomicU64, ticket: u64) -> bool {
    seq.load(Ordering::SeqCst) == ticket
}
