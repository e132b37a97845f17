//! Startup: decide between the maintenance screen and the portal.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use crate::net::api::PortalApi;

/// What the host should mount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppMode {
    Main { reviews_enabled: bool },
    Maintenance { message: Option<String> },
}

impl Default for AppMode {
    fn default() -> Self {
        Self::Main { reviews_enabled: true }
    }
}

/// Fetch `/flags` once and pick the app mode.
///
/// A failed flags request must not keep the portal from starting, so it
/// falls back to the main app with default flags.
pub async fn resolve_app_mode(api: &dyn PortalApi) -> AppMode {
    match api.fetch_flags().await {
        Ok(flags) if flags.portal_maintenance => {
            tracing::info!("portal is in maintenance mode");
            AppMode::Maintenance { message: flags.portal_maintenance_message }
        }
        Ok(flags) => AppMode::Main { reviews_enabled: flags.reviews_enabled },
        Err(err) => {
            tracing::error!(error = %err, "loading flags failed; starting with defaults");
            AppMode::default()
        }
    }
}
