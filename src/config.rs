//! Portal client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use reqwest::Url;

pub const DEFAULT_API_BASE: &str = "https://admin-grupo05.proyecto2025.linti.unlp.edu.ar";
pub const DEFAULT_PROTECTED_PATHS: &[&str] = &["/mis-resenas", "/favoritos", "/perfil"];

/// Provider login entry point, relative to the server origin.
pub const LOGIN_PATH: &str = "api/auth/google/login";

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `PORTAL_API_BASE` is not an absolute http(s) URL.
    #[error("invalid PORTAL_API_BASE '{value}': {reason}")]
    InvalidApiBase { value: String, reason: String },

    /// An entry of `PORTAL_PROTECTED_PATHS` is not an absolute path.
    #[error("invalid protected path '{0}' (must start with '/')")]
    InvalidProtectedPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Server origin; the path always ends in `/` so relative joins nest under it.
    api_base: Url,
    login_endpoint: Url,
    /// Paths that require a session before navigation proceeds.
    pub protected_paths: Vec<String>,
    /// JSON file backing client-side storage; in-memory when `None`.
    pub storage_path: Option<PathBuf>,
}

impl PortalConfig {
    /// Config for `api_base` with the default protected paths and in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBase`] for a malformed origin.
    pub fn new(api_base: &str) -> Result<Self, ConfigError> {
        let (api_base, login_endpoint) = parse_api_base(api_base)?;
        Ok(Self { api_base, login_endpoint, protected_paths: default_protected_paths(), storage_path: None })
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORTAL_API_BASE`: server origin (default [`DEFAULT_API_BASE`])
    /// - `PORTAL_PROTECTED_PATHS`: comma-separated paths (default [`DEFAULT_PROTECTED_PATHS`])
    /// - `PORTAL_STORAGE_PATH`: JSON file for client-side storage
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a value is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = std::env::var("PORTAL_API_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned());
        let mut config = Self::new(&base)?;
        config.protected_paths = parse_protected_paths(std::env::var("PORTAL_PROTECTED_PATHS").ok().as_deref())?;
        config.storage_path = std::env::var("PORTAL_STORAGE_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Ok(config)
    }

    /// Replace the API base, applying the same validation as [`Self::new`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBase`] for a malformed origin.
    pub fn with_api_base(mut self, raw: &str) -> Result<Self, ConfigError> {
        (self.api_base, self.login_endpoint) = parse_api_base(raw)?;
        Ok(self)
    }

    /// Server origin without a trailing slash, e.g. `https://host`.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base.as_str().trim_end_matches('/')
    }

    /// Root every API path hangs off, e.g. `https://host/api`.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}/api", self.api_base())
    }

    /// Provider login URL that sends the user back to `next` afterwards.
    #[must_use]
    pub fn login_url(&self, next: &str) -> Url {
        let mut url = self.login_endpoint.clone();
        url.query_pairs_mut().append_pair("next", next);
        url
    }

    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_paths.iter().any(|p| p == path)
    }
}

fn default_protected_paths() -> Vec<String> {
    DEFAULT_PROTECTED_PATHS.iter().map(|p| (*p).to_owned()).collect()
}

fn parse_api_base(raw: &str) -> Result<(Url, Url), ConfigError> {
    let value = raw.trim();
    let invalid = |reason: String| ConfigError::InvalidApiBase { value: value.to_owned(), reason };

    let mut base = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    if base.query().is_some() || base.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment".to_owned()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let login = base.join(LOGIN_PATH).map_err(|e| invalid(e.to_string()))?;
    Ok((base, login))
}

fn parse_protected_paths(raw: Option<&str>) -> Result<Vec<String>, ConfigError> {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(default_protected_paths());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.starts_with('/') { Ok(p.to_owned()) } else { Err(ConfigError::InvalidProtectedPath(p.to_owned())) }
        })
        .collect()
}
