//! Scripted [`PortalApi`] fake and fixtures shared by store, guard and
//! bootstrap tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tokio::sync::oneshot;

use super::session::SessionStore;
use crate::host::RecordingNavigator;
use crate::net::api::PortalApi;
use crate::net::error::ApiError;
use crate::net::types::{Flags, PageQuery, ProfileUpdate, User};

type Gate = Option<oneshot::Receiver<()>>;

#[must_use]
pub fn unauthorized() -> ApiError {
    ApiError::from_status(401, r#"{"msg":"Missing cookie \"access_token_cookie\""}"#.to_owned())
}

#[must_use]
pub fn server_error() -> ApiError {
    ApiError::from_status(500, r#"{"error":{"code":"server_error","message":"An unexpected error occurred"}}"#.to_owned())
}

#[must_use]
pub fn user(name: &str, avatar: Option<&str>) -> User {
    serde_json::from_value(json!({ "id": 1, "email": "ana@example.com", "name": name, "avatar": avatar })).unwrap()
}

/// Fake API answering from per-endpoint queues. Empty queues answer with
/// the "not logged in" defaults: 401 for `/me`, empty pages for lists.
#[derive(Default)]
pub struct MockApi {
    flags: Mutex<VecDeque<Result<Flags, ApiError>>>,
    me: Mutex<VecDeque<(Result<User, ApiError>, Gate)>>,
    update: Mutex<VecDeque<(Result<User, ApiError>, Gate)>>,
    logout: Mutex<VecDeque<Result<(), ApiError>>>,
    reviews: Mutex<VecDeque<(Result<Value, ApiError>, Gate)>>,
    favorites: Mutex<VecDeque<(Result<Value, ApiError>, Gate)>>,
    favorite_toggles: Mutex<VecDeque<Result<(), ApiError>>>,
    calls: Mutex<Vec<String>>,
    updates: Mutex<Vec<ProfileUpdate>>,
    queries: Mutex<Vec<PageQuery>>,
}

impl MockApi {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_flags(&self, result: Result<Flags, ApiError>) {
        self.flags.lock().unwrap().push_back(result);
    }

    pub fn push_me(&self, result: Result<User, ApiError>) {
        self.me.lock().unwrap().push_back((result, None));
    }

    /// Queue a `/me` answer that is held back until `gate` fires.
    pub fn push_me_gated(&self, result: Result<User, ApiError>, gate: oneshot::Receiver<()>) {
        self.me.lock().unwrap().push_back((result, Some(gate)));
    }

    pub fn push_update(&self, result: Result<User, ApiError>) {
        self.update.lock().unwrap().push_back((result, None));
    }

    pub fn push_update_gated(&self, result: Result<User, ApiError>, gate: oneshot::Receiver<()>) {
        self.update.lock().unwrap().push_back((result, Some(gate)));
    }

    pub fn push_logout(&self, result: Result<(), ApiError>) {
        self.logout.lock().unwrap().push_back(result);
    }

    pub fn push_reviews(&self, result: Result<Value, ApiError>) {
        self.reviews.lock().unwrap().push_back((result, None));
    }

    pub fn push_reviews_gated(&self, result: Result<Value, ApiError>, gate: oneshot::Receiver<()>) {
        self.reviews.lock().unwrap().push_back((result, Some(gate)));
    }

    pub fn push_favorites(&self, result: Result<Value, ApiError>) {
        self.favorites.lock().unwrap().push_back((result, None));
    }

    pub fn push_favorite_toggle(&self, result: Result<(), ApiError>) {
        self.favorite_toggles.lock().unwrap().push_back(result);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    #[must_use]
    pub fn updates(&self) -> Vec<ProfileUpdate> {
        self.updates.lock().unwrap().clone()
    }

    #[must_use]
    pub fn queries(&self) -> Vec<PageQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Yield until `call` has been issued at least `n` times.
    pub async fn wait_for(&self, call: &str, n: usize) {
        while self.count(call) < n {
            tokio::task::yield_now().await;
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_owned());
    }
}

async fn gated<T>(entry: Option<(T, Gate)>, fallback: T) -> T {
    let Some((result, gate)) = entry else {
        return fallback;
    };
    if let Some(gate) = gate {
        let _ = gate.await;
    }
    result
}

#[async_trait::async_trait]
impl PortalApi for MockApi {
    async fn fetch_flags(&self) -> Result<Flags, ApiError> {
        self.record("fetch_flags");
        let next = self.flags.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(ApiError::Request("connection refused".into())))
    }

    async fn fetch_me(&self) -> Result<User, ApiError> {
        self.record("fetch_me");
        let next = self.me.lock().unwrap().pop_front();
        gated(next, Err(unauthorized())).await
    }

    async fn update_me(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.record("update_me");
        self.updates.lock().unwrap().push(update.clone());
        let next = self.update.lock().unwrap().pop_front();
        gated(next, Err(server_error())).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record("logout");
        let next = self.logout.lock().unwrap().pop_front();
        next.unwrap_or(Ok(()))
    }

    async fn list_my_reviews(&self, query: PageQuery) -> Result<Value, ApiError> {
        self.record("list_my_reviews");
        self.queries.lock().unwrap().push(query);
        let next = self.reviews.lock().unwrap().pop_front();
        gated(next, Ok(json!({ "data": [], "total": 0 }))).await
    }

    async fn list_my_favorites(&self, query: PageQuery) -> Result<Value, ApiError> {
        self.record("list_my_favorites");
        self.queries.lock().unwrap().push(query);
        let next = self.favorites.lock().unwrap().pop_front();
        gated(next, Ok(json!({ "data": [], "total": 0 }))).await
    }

    async fn add_favorite(&self, _site_id: i64) -> Result<(), ApiError> {
        self.record("add_favorite");
        let next = self.favorite_toggles.lock().unwrap().pop_front();
        next.unwrap_or(Ok(()))
    }

    async fn remove_favorite(&self, _site_id: i64) -> Result<(), ApiError> {
        self.record("remove_favorite");
        let next = self.favorite_toggles.lock().unwrap().pop_front();
        next.unwrap_or(Ok(()))
    }
}

/// A store over `api` with a recording navigator.
#[must_use]
pub fn store_with(api: &Arc<MockApi>) -> (Arc<SessionStore>, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::new());
    let store = SessionStore::new(api.clone(), navigator.clone());
    (Arc::new(store), navigator)
}
