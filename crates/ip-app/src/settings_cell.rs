use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use ip_core::settings::model::PasteSettings;

/// Live, shared view of the paste settings.
///
/// Paste handlers run synchronously inside the host's event dispatch, so they
/// read settings from this cell instead of going through the async settings port.
/// `UpdateSettings` publishes every persisted change here.
///
/// 粘贴设置的共享内存视图。
#[derive(Debug, Clone, Default)]
pub struct SettingsCell {
    inner: Arc<RwLock<PasteSettings>>,
}

impl SettingsCell {
    pub fn new(settings: PasteSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn get(&self) -> PasteSettings {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn replace(&self, settings: PasteSettings) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = settings;
    }

    /// Directory handed to the fetch-and-store port, relative to the document root.
    pub fn target_directory(&self) -> PathBuf {
        PathBuf::from(self.get().normalized_target_directory())
    }
}
