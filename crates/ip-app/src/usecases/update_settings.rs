//! Use case for updating plugin settings
//! 更新插件设置的用例

use std::sync::Arc;

use anyhow::{anyhow, Result};
use ip_core::ports::SettingsPort;
use ip_core::settings::model::{PasteSettings, Settings, CURRENT_SCHEMA_VERSION};
use tracing::{info, info_span, Instrument};

use crate::settings_cell::SettingsCell;

/// Use case for updating the settings.
///
/// ## Behavior / 行为
/// - Loads current settings for comparison
/// - Rejects settings written for another schema version
/// - Rejects a target directory that leaves the document root
/// - Logs changed fields with old/new values
/// - Persists settings, then publishes the paste section to the live [`SettingsCell`]
///
/// Handlers read the cell on every event, so a change affects the next paste
/// without reinstalling anything.
pub struct UpdateSettings {
    settings: Arc<dyn SettingsPort>,
    live: SettingsCell,
}

impl UpdateSettings {
    pub fn new(settings: Arc<dyn SettingsPort>, live: SettingsCell) -> Self {
        Self { settings, live }
    }

    /// Execute the use case.
    ///
    /// # Returns / 返回值
    /// - `Ok(())` if settings are saved and published
    /// - `Err(e)` if validation or save fails; the live view is left untouched
    pub async fn execute(&self, settings: Settings) -> Result<()> {
        let span = info_span!("usecase.update_settings.execute");

        async {
            let old_settings = self.settings.load().await?;

            let changes = PasteSettingsDiff::diff(&old_settings.paste, &settings.paste);
            if changes.is_empty() {
                info!("Updating settings (no changes detected)");
            } else {
                info!(changed_fields = %changes.to_log_string(), "Updating settings");
            }

            if settings.schema_version != CURRENT_SCHEMA_VERSION {
                return Err(anyhow!(
                    "Invalid schema version: expected {}, got {}",
                    CURRENT_SCHEMA_VERSION,
                    settings.schema_version
                ));
            }

            if !settings.paste.target_directory_is_contained() {
                return Err(anyhow!(
                    "Invalid target directory: {:?} leaves the document root",
                    settings.paste.normalized_target_directory()
                ));
            }

            self.settings.save(&settings).await?;
            self.live.replace(settings.paste);

            info!("Settings updated successfully");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

struct PasteSettingsDiff {
    target_directory: Option<(Option<String>, Option<String>)>,
    save_on_paste: Option<(bool, bool)>,
}

impl PasteSettingsDiff {
    fn diff(old: &PasteSettings, new: &PasteSettings) -> Self {
        Self {
            target_directory: (old.target_directory != new.target_directory)
                .then(|| (old.target_directory.clone(), new.target_directory.clone())),
            save_on_paste: (old.save_on_paste != new.save_on_paste)
                .then_some((old.save_on_paste, new.save_on_paste)),
        }
    }

    fn is_empty(&self) -> bool {
        self.target_directory.is_none() && self.save_on_paste.is_none()
    }

    fn to_log_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some((old, new)) = &self.target_directory {
            parts.push(format!("paste.target_directory: {:?} -> {:?}", old, new));
        }
        if let Some((old, new)) = self.save_on_paste {
            parts.push(format!("paste.save_on_paste: {} -> {}", old, new));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemorySettings {
        stored: Mutex<Settings>,
        saves: Mutex<usize>,
    }

    #[async_trait]
    impl SettingsPort for InMemorySettings {
        async fn load(&self) -> Result<Settings> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, settings: &Settings) -> Result<()> {
            *self.stored.lock().unwrap() = settings.clone();
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn persists_and_publishes_new_settings() {
        let repo = Arc::new(InMemorySettings::default());
        let live = SettingsCell::default();
        let uc = UpdateSettings::new(repo.clone(), live.clone());

        let mut settings = Settings::default();
        settings.paste.target_directory = Some("assets".into());
        settings.paste.save_on_paste = false;
        uc.execute(settings.clone()).await.unwrap();

        assert_eq!(*repo.stored.lock().unwrap(), settings);
        assert_eq!(live.get(), settings.paste);
    }

    #[tokio::test]
    async fn rejects_foreign_schema_version() {
        let repo = Arc::new(InMemorySettings::default());
        let live = SettingsCell::default();
        let uc = UpdateSettings::new(repo.clone(), live.clone());

        let mut settings = Settings::default();
        settings.schema_version = CURRENT_SCHEMA_VERSION + 1;
        settings.paste.save_on_paste = false;

        let err = uc.execute(settings).await.unwrap_err();
        assert!(err.to_string().contains("Invalid schema version"));
        assert_eq!(*repo.saves.lock().unwrap(), 0);
        assert!(live.get().save_on_paste);
    }

    #[tokio::test]
    async fn rejects_target_directory_outside_root() {
        let repo = Arc::new(InMemorySettings::default());
        let live = SettingsCell::default();
        let uc = UpdateSettings::new(repo.clone(), live.clone());

        let mut settings = Settings::default();
        settings.paste.target_directory = Some("../outside".into());

        let err = uc.execute(settings).await.unwrap_err();
        assert!(err.to_string().contains("Invalid target directory"));
        assert_eq!(*repo.saves.lock().unwrap(), 0);
        assert_eq!(live.get().target_directory, None);
    }

    #[test]
    fn diff_reports_only_changed_fields() {
        let old = PasteSettings::default();
        let new = PasteSettings {
            target_directory: Some("img".into()),
            ..PasteSettings::default()
        };
        let diff = PasteSettingsDiff::diff(&old, &new);
        assert!(!diff.is_empty());
        assert_eq!(
            diff.to_log_string(),
            "paste.target_directory: None -> Some(\"img\")"
        );
        assert!(PasteSettingsDiff::diff(&old, &old).is_empty());
    }
}
