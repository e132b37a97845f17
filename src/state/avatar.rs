//! Avatar cache-busting.
//!
//! Remote avatar URLs handed to views always carry a fresh `t` stamp so an
//! updated picture at an unchanged URL is refetched. Embedded `data:` avatars
//! are left alone.

#[cfg(test)]
#[path = "avatar_test.rs"]
mod avatar_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::net::types::{Avatar, User};

/// Issues strictly increasing millisecond stamps.
///
/// Wall-clock time when it has moved on, otherwise the previous stamp plus
/// one, so two fetches in the same millisecond still differ.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicU64,
}

impl CacheBuster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_stamp(&self) -> u64 {
        let now = now_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self.last.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Rewrite a remote avatar on `user` with a fresh stamp.
    pub fn apply(&self, user: &mut User) {
        let Some(Avatar::Remote(url)) = user.avatar() else {
            return;
        };
        let busted = with_stamp(url, self.next_stamp());
        user.set_avatar(busted);
    }
}

/// Append `t=<stamp>` to `url`, before any fragment.
#[must_use]
pub fn with_stamp(url: &str, stamp: u64) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let sep = if base.contains('?') { '&' } else { '?' };
    let mut out = format!("{base}{sep}t={stamp}");
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
