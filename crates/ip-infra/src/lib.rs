//! Infrastructure adapters for the ImgPaste ports.
//!
//! - [`fetch`]: saves pasted bytes or downloaded URLs under the document root
//! - [`settings`]: JSON settings file with atomic writes and schema migration
//! - [`time`]: wall clock

pub mod fetch;
pub mod settings;
pub mod time;

pub use fetch::FsFetchStore;
pub use settings::FileSettingsRepository;
pub use time::SystemClock;
