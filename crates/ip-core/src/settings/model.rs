use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteSettings {
    /// Directory (relative to the document root) that receives saved images.
    ///
    /// `None` or an empty string saves into the document root itself.
    /// 图片保存目录；为空时保存到文档根目录。
    #[serde(default)]
    pub target_directory: Option<String>,

    /// Whether pasted or dropped images are saved at all.
    #[serde(default = "default_save_on_paste")]
    pub save_on_paste: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub paste: PasteSettings,
}

impl PasteSettings {
    /// Configured directory with surrounding whitespace and separators removed.
    pub fn normalized_target_directory(&self) -> &str {
        self.target_directory
            .as_deref()
            .map(|dir| dir.trim().trim_matches(|c| c == '/' || c == '\\'))
            .unwrap_or("")
    }

    /// Whether the target directory stays below the document root (no `..`, no drive prefix).
    pub fn target_directory_is_contained(&self) -> bool {
        Path::new(self.normalized_target_directory())
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
    }
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

fn default_save_on_paste() -> bool {
    true
}
