use std::fmt;

use crate::ids::PasteId;

use super::locate::{locate_first, LocatedRange};

/// Label prefix carried by every in-progress placeholder.
pub const PROGRESS_LABEL: &str = "Downloading file...";

/// Text that replaces a placeholder whose fetch failed.
pub const FAILURE_TEXT: &str = "⚠️ImgPaste download failed, check dev console";

/// Temporary text standing in for an image while its save is pending.
///
/// The marker is an image embed with an empty target whose label encodes the
/// paste id: `![Downloading file...<id>]()`. The id is embedded verbatim, so two
/// distinct ids can never produce the same marker.
///
/// 图片保存完成前占位的临时文本。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker(String);

impl Marker {
    pub fn for_id(id: &PasteId) -> Self {
        Self(format!("![{PROGRESS_LABEL}{id}]()"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Marker text followed by the newline inserted at paste time.
    pub fn as_line(&self) -> String {
        format!("{}\n", self.0)
    }

    /// First occurrence of this marker in `text`, see [`locate_first`].
    pub fn locate_in(&self, text: &str) -> Option<LocatedRange> {
        locate_first(text, &self.0)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Marker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Embed markup pointing at a saved image.
pub fn embed_image(reference: &str) -> String {
    format!("![]({reference})")
}
