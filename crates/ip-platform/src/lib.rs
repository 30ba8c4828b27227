//! Host-side adapters.
//!
//! - [`app_dirs`]: resolves the per-user data directory
//! - [`editor`]: an in-memory editor host that implements the editor ports,
//!   used by the command line front end and by tests

pub mod app_dirs;
pub mod editor;

pub use app_dirs::DirsAppDirsAdapter;
pub use editor::{InMemoryEditor, NativePasteHandler, TextBuffer};
