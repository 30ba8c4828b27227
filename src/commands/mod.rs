//! Command handlers behind the CLI.
//!
//! Each handler takes the wired [`AppDeps`](crate::bootstrap::AppDeps) and parsed
//! arguments, and returns data for `main` to print.

pub mod paste;
pub mod settings;
