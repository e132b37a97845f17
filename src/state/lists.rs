//! The user's review and favorite lists.
//!
//! The two list endpoints have drifted apart: items arrive under `data` or
//! under a per-endpoint key, and the total arrives top-level or under
//! `meta`. Anything unrecognized reads as an empty page.

#[cfg(test)]
#[path = "lists_test.rs"]
mod lists_test;

use serde_json::Value;

/// Which list a page belongs to; also names the per-endpoint items key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Reviews,
    Favorites,
}

impl ListKind {
    #[must_use]
    pub fn items_key(self) -> &'static str {
        match self {
            Self::Reviews => "reviews",
            Self::Favorites => "favorites",
        }
    }
}

/// One page of opaque records plus the server-side total.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListPage {
    pub items: Vec<Value>,
    pub total: u64,
}

impl ListPage {
    /// Normalize a list response body, tolerating both known shapes.
    #[must_use]
    pub fn from_response(body: &Value, kind: ListKind) -> Self {
        let items = [body.get("data"), body.get(kind.items_key())]
            .into_iter()
            .flatten()
            .find_map(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let total = [body.get("total"), body.pointer("/meta/total")]
            .into_iter()
            .flatten()
            .find_map(Value::as_u64)
            .unwrap_or(0);

        if items.is_empty() && total == 0 && !is_recognized(body, kind) {
            tracing::debug!(list = kind.items_key(), "unrecognized list response shape");
        }

        Self { items, total }
    }
}

fn is_recognized(body: &Value, kind: ListKind) -> bool {
    body.get("data").is_some() || body.get(kind.items_key()).is_some() || body.get("total").is_some()
}
