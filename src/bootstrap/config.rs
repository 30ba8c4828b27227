//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**
//!
//! Empty paths are filled from the application data directory by
//! [`resolve_config`]; nothing else is defaulted here.

use anyhow::Context;
use ip_app::app_paths::AppPaths;
use ip_core::config::AppConfig;
use ip_core::ports::AppDirsPort;
use ip_platform::app_dirs::DirsAppDirsAdapter;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Resolve the effective configuration.
///
/// An explicit `--config` path must exist. Without one, `config.toml` in the
/// application data directory is used when present. Remaining empty paths are
/// filled from the application data directory, and the document root falls
/// back to `cwd`.
pub fn resolve_config(explicit: Option<PathBuf>, cwd: &Path) -> anyhow::Result<AppConfig> {
    let app_dirs = DirsAppDirsAdapter::new()
        .get_app_dirs()
        .context("Failed to resolve application data directory")?;
    let paths = AppPaths::from_app_dirs(&app_dirs);

    let config = match explicit {
        Some(path) => load_config(path)?,
        None if paths.config_path.is_file() => load_config(paths.config_path.clone())?,
        None => AppConfig::empty(),
    };

    Ok(config.with_fallbacks(&app_dirs.app_data_root, cwd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [storage]
            document_root = "/notes"
            settings_path = "/cfg/settings.json"

            [logging]
            directory = "/logs"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.document_root, PathBuf::from("/notes"));
        assert_eq!(config.settings_path, PathBuf::from("/cfg/settings.json"));
        assert_eq!(config.log_dir, PathBuf::from("/logs"));
    }

    #[test]
    fn test_load_config_accepts_empty_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndocument_root = \"\"\n")
            .unwrap();

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config(PathBuf::from("/nonexistent/imgpaste.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_reports_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[storage\n").unwrap();

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn explicit_config_keeps_configured_paths() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndocument_root = \"/vault\"\n")
            .unwrap();

        let config =
            resolve_config(Some(temp_file.path().to_path_buf()), Path::new("/cwd")).unwrap();

        assert_eq!(config.document_root, PathBuf::from("/vault"));
        assert!(config.settings_path.ends_with("settings.json"));
        assert!(config.log_dir.ends_with("logs"));
    }
}
