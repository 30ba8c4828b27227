use super::model::*;

impl Default for PasteSettings {
    fn default() -> Self {
        Self {
            target_directory: None,
            save_on_paste: true,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            paste: PasteSettings::default(),
        }
    }
}
