use anyhow::{anyhow, Result};
use ip_core::ports::SettingsMigrationPort;
use ip_core::settings::model::Settings;
use ip_core::settings::version::SettingsVersion;

/// Walks a settings document forward one schema version at a time.
pub struct SettingsMigrator {
    migrations: Vec<Box<dyn SettingsMigrationPort>>,
}

impl SettingsMigrator {
    pub fn new() -> Self {
        Self {
            migrations: vec![
                // Box::new(MigrationV1ToV2),
            ],
        }
    }

    pub fn with_migrations(migrations: Vec<Box<dyn SettingsMigrationPort>>) -> Self {
        Self { migrations }
    }

    /// Apply migrations until the document reaches the current schema version.
    ///
    /// Fails when a step is missing instead of guessing at the document's shape.
    pub fn migrate_to_latest(&self, mut settings: Settings) -> Result<Settings> {
        let latest = SettingsVersion::CURRENT.as_u32();
        while settings.schema_version < latest {
            let current = settings.schema_version;
            let migration = self
                .migrations
                .iter()
                .find(|m| m.from_version() == current)
                .ok_or_else(|| anyhow!("no settings migration found from version {current}"))?;

            settings = migration.migrate(settings);
            settings.schema_version = migration.to_version();
        }

        Ok(settings)
    }
}

impl Default for SettingsMigrator {
    fn default() -> Self {
        Self::new()
    }
}
