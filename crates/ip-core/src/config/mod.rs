//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**
//!
//! Empty values are facts, not errors.

use std::path::{Path, PathBuf};

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root every saved image path is resolved against.
    ///
    /// The configured target directory is joined onto this root; the reference
    /// written into the buffer is relative to it.
    pub document_root: PathBuf,

    /// Persisted user settings file.
    pub settings_path: PathBuf,

    /// Directory for log files.
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let storage_path = |key: &str| {
            PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get(key))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            )
        };

        Ok(Self {
            document_root: storage_path("document_root"),
            settings_path: storage_path("settings_path"),
            log_dir: PathBuf::from(
                toml_value
                    .get("logging")
                    .and_then(|l| l.get("directory"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
        })
    }

    /// Create empty AppConfig (all empty values)
    /// 创建空的 AppConfig
    pub fn empty() -> Self {
        Self {
            document_root: PathBuf::new(),
            settings_path: PathBuf::new(),
            log_dir: PathBuf::new(),
        }
    }

    /// Fill empty paths from an application data directory and a document root.
    ///
    /// Values already present are kept untouched.
    pub fn with_fallbacks(mut self, app_data_root: &Path, document_root: &Path) -> Self {
        if self.document_root.as_os_str().is_empty() {
            self.document_root = document_root.to_path_buf();
        }
        if self.settings_path.as_os_str().is_empty() {
            self.settings_path = app_data_root.join("settings.json");
        }
        if self.log_dir.as_os_str().is_empty() {
            self.log_dir = app_data_root.join("logs");
        }
        self
    }
}
