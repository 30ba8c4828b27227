//! Use case for getting plugin settings
//! 获取插件设置的用例

use std::sync::Arc;

use anyhow::Result;
use ip_core::ports::SettingsPort;
use ip_core::settings::model::Settings;
use tracing::{debug, info_span, Instrument};

/// Use case for retrieving the persisted settings.
///
/// ## Behavior / 行为
/// - Loads settings from the settings port
/// - Returns the complete settings structure
pub struct GetSettings {
    settings: Arc<dyn SettingsPort>,
}

impl GetSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    /// Execute the use case.
    ///
    /// # Returns / 返回值
    /// - `Ok(Settings)` the current settings
    /// - `Err(e)` if loading settings fails
    pub async fn execute(&self) -> Result<Settings> {
        let span = info_span!("usecase.get_settings.execute");

        async {
            let settings = self.settings.load().await?;
            debug!(
                save_on_paste = settings.paste.save_on_paste,
                target_directory = settings.paste.normalized_target_directory(),
                "Settings retrieved"
            );
            Ok(settings)
        }
        .instrument(span)
        .await
    }
}
