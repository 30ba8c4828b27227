//! # ip-core
//!
//! Core domain models and ports for ImgPaste.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the placeholder marker format, the locate-and-replace scan, image source extraction,
//! the paste decision policy, and the port traits implemented by hosts and adapters.

pub mod app_dirs;
pub mod config;
pub mod fetch;
pub mod ids;
pub mod paste;
pub mod placeholder;
pub mod ports;
pub mod settings;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use fetch::FetchOutcome;
pub use ids::{EditorId, PasteId};
pub use paste::{
    ClipboardFile, ImageSource, MimeType, PasteDecision, PasteDisposition, PasteEvent, PasteKind,
};
pub use placeholder::{Marker, Position};
pub use settings::model::{PasteSettings, Settings};
