//! Host seams standing in for browser globals.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store and the navigation guard never touch the outside world
//! directly; they go through these traits so the same flow runs in the CLI
//! and in tests.

pub mod navigator;
pub mod storage;

pub use navigator::{Navigator, RecordingNavigator};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, REDIRECT_AFTER_LOGIN_KEY, StorageError};
