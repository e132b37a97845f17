//! Portal REST endpoints.
//!
//! DESIGN
//! ======
//! [`PortalApi`] is the seam between the session store and the network.
//! [`HttpPortalApi`] is the real implementation over [`ApiClient`]; tests
//! plug in scripted fakes instead.
//!
//! List endpoints return the raw JSON document because the server does not
//! use one stable shape for them; the store normalizes it.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use reqwest::Method;
use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{Flags, PageQuery, ProfileUpdate, User};

/// Server operations the portal client depends on.
#[async_trait::async_trait]
pub trait PortalApi: Send + Sync {
    /// `GET /flags`.
    async fn fetch_flags(&self) -> Result<Flags, ApiError>;

    /// `GET /me`.
    async fn fetch_me(&self) -> Result<User, ApiError>;

    /// `PUT /me`.
    async fn update_me(&self, update: &ProfileUpdate) -> Result<User, ApiError>;

    /// `POST /logout`.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /me/reviews`.
    async fn list_my_reviews(&self, query: PageQuery) -> Result<Value, ApiError>;

    /// `GET /me/favorites`.
    async fn list_my_favorites(&self, query: PageQuery) -> Result<Value, ApiError>;

    /// `PUT /sites/{id}/favorite`.
    async fn add_favorite(&self, site_id: i64) -> Result<(), ApiError>;

    /// `DELETE /sites/{id}/favorite`.
    async fn remove_favorite(&self, site_id: i64) -> Result<(), ApiError>;
}

pub struct HttpPortalApi {
    client: ApiClient,
}

impl HttpPortalApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl PortalApi for HttpPortalApi {
    async fn fetch_flags(&self) -> Result<Flags, ApiError> {
        let req = self.client.request(Method::GET, "/flags")?;
        self.client.send_json(req).await
    }

    async fn fetch_me(&self) -> Result<User, ApiError> {
        let req = self.client.request(Method::GET, "/me")?;
        self.client.send_json(req).await
    }

    async fn update_me(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let req = self.client.request(Method::PUT, "/me")?.json(update);
        self.client.send_json(req).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let req = self.client.request(Method::POST, "/logout")?;
        self.client.send_empty(req).await
    }

    async fn list_my_reviews(&self, query: PageQuery) -> Result<Value, ApiError> {
        let req = self.client.request(Method::GET, "/me/reviews")?.query(&query);
        self.client.send_json(req).await
    }

    async fn list_my_favorites(&self, query: PageQuery) -> Result<Value, ApiError> {
        let req = self.client.request(Method::GET, "/me/favorites")?.query(&query);
        self.client.send_json(req).await
    }

    async fn add_favorite(&self, site_id: i64) -> Result<(), ApiError> {
        let req = self.client.request(Method::PUT, &favorite_path(site_id))?;
        self.client.send_empty(req).await
    }

    async fn remove_favorite(&self, site_id: i64) -> Result<(), ApiError> {
        let req = self.client.request(Method::DELETE, &favorite_path(site_id))?;
        self.client.send_empty(req).await
    }
}

fn favorite_path(site_id: i64) -> String {
    format!("/sites/{site_id}/favorite")
}
