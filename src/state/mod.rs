//! Client-side state.
//!
//! DESIGN
//! ======
//! One [`session::SessionStore`] per running portal holds everything the
//! views read about the current user. Helpers it leans on (avatar stamping,
//! list normalization) live in their own modules so they can be tested
//! without a store.

pub mod avatar;
pub mod lists;
pub mod session;

#[cfg(test)]
pub mod test_helpers;

pub use lists::{ListKind, ListPage};
pub use session::{SessionState, SessionStore};
