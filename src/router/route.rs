//! In-app navigation targets.

/// A navigation target: the bare path used for matching and the full path
/// (with query and fragment) used for redirects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    path: String,
    full_path: String,
}

impl Route {
    /// Parse a location such as `/perfil?tab=reviews#top`.
    ///
    /// A missing leading `/` is added; an empty location is `/`.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let full_path = if location.starts_with('/') { location.to_owned() } else { format!("/{location}") };
        let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
        let path = full_path[..end].to_owned();
        Self { path, full_path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn full_path(&self) -> &str {
        &self.full_path
    }
}

/// `true` for same-origin absolute paths; rejects `//host` and `/\host`
/// forms browsers treat as another origin.
#[must_use]
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}
