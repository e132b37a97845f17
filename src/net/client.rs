//! Configured HTTP client shared by every portal API call.
//!
//! DESIGN
//! ======
//! One `reqwest::Client` with a shared cookie jar carries the session
//! cookies on every request. Each request built through [`ApiClient::request`]
//! reads the CSRF cookie from that jar at build time and echoes it as the
//! `X-CSRF-TOKEN` header. A missing cookie just means no header.
//!
//! No retries and no timeout policy: a stalled server stalls the caller.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::config::PortalConfig;

pub const CSRF_COOKIE: &str = "csrf_access_token";
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base: Url,
}

impl ApiClient {
    /// Build a client with a fresh, empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or base URL cannot be built.
    pub fn from_config(config: &PortalConfig) -> Result<Self, ApiError> {
        Self::new(config, Arc::new(Jar::default()))
    }

    /// Build a client over an existing cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or base URL cannot be built.
    pub fn new(config: &PortalConfig, jar: Arc<Jar>) -> Result<Self, ApiError> {
        let base = Url::parse(&format!("{}/", config.api_url())).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, jar, base })
    }

    /// The cookie jar requests read from and responses write into.
    #[must_use]
    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Resolve an API path such as `/me/reviews` under the `/api` base.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the path does not form a valid URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Current CSRF token from the cookie jar, if the server has set one.
    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base)?;
        let header = header.to_str().ok()?;
        read_cookie(header, CSRF_COOKIE).map(str::to_owned)
    }

    /// Start a request with credentials and the CSRF header attached.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the path does not form a valid URL.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.csrf_token().and_then(|t| HeaderValue::from_str(&t).ok()) {
            builder = builder.header(CSRF_HEADER, token);
        }
        Ok(builder)
    }

    /// Send a request and decode a JSON body from a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] on transport failure, [`ApiError::Status`]
    /// for non-2xx answers, and [`ApiError::Parse`] for undecodable bodies.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let text = self.send_text(builder).await?;
        parse_json(&text)
    }

    /// Send a request and discard the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] on transport failure and [`ApiError::Status`]
    /// for non-2xx answers.
    pub async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send_text(builder).await.map(drop)
    }

    async fn send_text(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status();
        let url = response.url().path().to_owned();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;

        tracing::debug!(%url, status = status.as_u16(), "api response");
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), text));
        }
        Ok(text)
    }
}

/// Find `name` in a `a=1; b=2` cookie header and return its value.
///
/// Empty values count as absent.
#[must_use]
pub fn read_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .map(str::trim_start)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

pub(crate) fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}
