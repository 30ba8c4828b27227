use std::path::PathBuf;

use ip_core::app_dirs::AppDirs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub settings_path: PathBuf,
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_app_dirs(dirs: &AppDirs) -> Self {
        Self {
            settings_path: dirs.app_data_root.join("settings.json"),
            config_path: dirs.app_data_root.join("config.toml"),
            logs_dir: dirs.app_data_root.join("logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn app_paths_derives_concrete_locations_from_app_data_root() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/imgpaste"),
        };

        let paths = AppPaths::from_app_dirs(&dirs);

        assert_eq!(paths.settings_path, PathBuf::from("/tmp/imgpaste/settings.json"));
        assert_eq!(paths.config_path, PathBuf::from("/tmp/imgpaste/config.toml"));
        assert_eq!(paths.logs_dir, PathBuf::from("/tmp/imgpaste/logs"));
    }
}
