#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsVersion {
    V1,
}

impl SettingsVersion {
    pub const CURRENT: SettingsVersion = SettingsVersion::V1;

    pub fn as_u32(self) -> u32 {
        match self {
            SettingsVersion::V1 => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::model::CURRENT_SCHEMA_VERSION;

    #[test]
    fn current_version_matches_schema_constant() {
        assert_eq!(SettingsVersion::CURRENT.as_u32(), CURRENT_SCHEMA_VERSION);
    }
}
