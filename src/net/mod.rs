//! Networking: the configured HTTP client, endpoint wrappers, wire types.

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::{HttpPortalApi, PortalApi};
pub use client::ApiClient;
pub use error::ApiError;
