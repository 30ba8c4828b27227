//! Business logic use cases
//!
//! ```text
//! native paste/drop event
//!         ↓
//! PasteInterceptor          → pass through / capture
//!         ↓
//! PlaceholderProtocol       → marker now, fetch later, patch marker
//! ---------------------------------
//! HandlerLifecycleManager   → install / restore interceptors per editor
//! GetSettings / UpdateSettings
//! ```

pub mod get_settings;
pub mod handler_lifecycle;
pub mod paste_interceptor;
pub mod placeholder;
pub mod update_settings;

pub use get_settings::GetSettings;
pub use handler_lifecycle::{HandlerBindings, HandlerLifecycleManager};
pub use paste_interceptor::PasteInterceptor;
pub use placeholder::{CaptureError, MarkerReplacement, PlaceholderProtocol};
pub use update_settings::UpdateSettings;
