//! Client-side routing concerns that carry behavior: the navigation guard
//! and the route value it inspects.

pub mod guard;
pub mod route;

pub use guard::{GuardDecision, LOGIN_ERROR_PATH, NavigationGuard};
pub use route::Route;
