//! Shared utilities for the vault governance workspace.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use time::{format_commit_wait, format_duration};
