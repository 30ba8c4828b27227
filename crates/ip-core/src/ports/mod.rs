//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and host or infrastructure implementations. The host editor supplies
//! [`EditorBufferPort`] and [`EditorInstancePort`]; infrastructure supplies
//! [`FetchStorePort`], [`SettingsPort`] and [`ClockPort`].

pub mod app_dirs;
mod clock;
pub mod editor;
pub mod errors;
pub mod fetch_store;
pub mod paste_handler;
pub mod settings;

pub use app_dirs::AppDirsPort;
pub use clock::ClockPort;
pub use editor::{EditorBufferPort, EditorInstancePort};
pub use errors::{AppDirsError, EditorError, FetchError};
pub use fetch_store::FetchStorePort;
pub use paste_handler::PasteHandler;
pub use settings::{SettingsMigrationPort, SettingsPort};

