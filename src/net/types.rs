//! Wire DTOs for the portal API.
//!
//! DESIGN
//! ======
//! The server's user and list records are treated as opaque JSON objects.
//! Only the fields the session flow actually reads get typed accessors, so
//! a server adding fields never breaks deserialization.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// FLAGS
// =============================================================================

/// Feature flags served by `GET /flags`, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub portal_maintenance: bool,
    #[serde(default)]
    pub portal_maintenance_message: Option<String>,
    #[serde(default = "default_true")]
    pub reviews_enabled: bool,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// USER
// =============================================================================

/// The authenticated user as returned by `GET /me` / `PUT /me`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

impl User {
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.str_field("last_name")
    }

    /// Raw avatar string, whatever form the server sent it in.
    #[must_use]
    pub fn avatar_raw(&self) -> Option<&str> {
        self.str_field("avatar")
    }

    #[must_use]
    pub fn avatar(&self) -> Option<Avatar<'_>> {
        self.avatar_raw().filter(|s| !s.is_empty()).map(Avatar::classify)
    }

    pub fn set_avatar(&mut self, avatar: String) {
        self.0.insert("avatar".to_owned(), Value::String(avatar));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// An avatar reference: embedded image data or a remote URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Avatar<'a> {
    /// A `data:` URL carrying the image inline.
    Embedded(&'a str),
    /// Anything else, fetched by the browser over HTTP.
    Remote(&'a str),
}

impl<'a> Avatar<'a> {
    #[must_use]
    pub fn classify(raw: &'a str) -> Self {
        if raw.starts_with("data:") { Self::Embedded(raw) } else { Self::Remote(raw) }
    }

    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::Embedded(s) | Self::Remote(s) => s,
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Sort direction for the user's review/favorite lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}' (expected 'asc' or 'desc')")),
        }
    }
}

/// Query parameters for `GET /me/reviews` and `GET /me/favorites`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(rename = "order_by")]
    pub order: SortOrder,
}

impl PageQuery {
    pub const DEFAULT_PER_PAGE: u32 = 25;

    #[must_use]
    pub fn new(page: u32, order: SortOrder, per_page: u32) -> Self {
        Self { page, per_page, order }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, per_page: Self::DEFAULT_PER_PAGE, order: SortOrder::Desc }
    }
}

// =============================================================================
// PROFILE UPDATE
// =============================================================================

/// What a profile form hands to the store.
///
/// `last_name: None` means the form never had the field; `Some("")` means the
/// user cleared it. A JSON `"last_name": null` is read as `Some("")`.
/// A missing `name` is sent as `""`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "present_as_string")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Only invoked when the key is present, so absence stays `None`.
fn present_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(Some(value.unwrap_or_default()))
}

/// Body of `PUT /me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<ProfileInput> for ProfileUpdate {
    fn from(input: ProfileInput) -> Self {
        Self {
            name: input.name,
            last_name: input.last_name,
            avatar: input.avatar.filter(|a| !a.is_empty()),
        }
    }
}
