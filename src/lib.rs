//! Client core for the historic-sites public portal.
//!
//! SYSTEM CONTEXT
//! ==============
//! The portal talks to the admin backend over JSON. Authentication is a pair
//! of cookies set by the backend's OAuth callback; mutating requests must
//! echo the readable `csrf_access_token` cookie as an `X-CSRF-TOKEN` header.
//! Everything here runs the same flow a browser front-end would: one shared
//! session store, a guard in front of protected routes, and a flags check at
//! startup.

pub mod bootstrap;
pub mod config;
pub mod host;
pub mod net;
pub mod portal;
pub mod router;
pub mod state;

pub use bootstrap::{AppMode, resolve_app_mode};
pub use config::PortalConfig;
pub use portal::{Portal, PortalError};
