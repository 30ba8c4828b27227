//! ImgPaste Application Orchestration Layer
//!
//! This crate contains the use cases that turn a native paste into a saved
//! image reference: the placeholder protocol, the paste interceptor and the
//! bookkeeping that installs and restores paste handlers.

pub mod app_paths;
pub mod settings_cell;
pub mod usecases;

pub use settings_cell::SettingsCell;
pub use usecases::{
    CaptureError, GetSettings, HandlerBindings, HandlerLifecycleManager, MarkerReplacement,
    PasteInterceptor, PlaceholderProtocol, UpdateSettings,
};
