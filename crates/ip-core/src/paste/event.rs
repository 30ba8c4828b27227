use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::mime::MimeType;

/// Which native gesture produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasteKind {
    Paste,
    Drop,
}

/// One file carried by a clipboard or drag payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardFile {
    pub name: String,
    pub mime: MimeType,
    pub data: Bytes,
}

impl ClipboardFile {
    pub fn new(name: impl Into<String>, mime: MimeType, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime,
            data: data.into(),
        }
    }
}

/// Native paste or drop event as seen by a paste handler.
///
/// 宿主编辑器传入的原生粘贴/拖放事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    pub kind: PasteKind,
    pub files: Vec<ClipboardFile>,
    pub text: Option<String>,
    pub html: Option<String>,
}

impl PasteEvent {
    pub fn new(kind: PasteKind) -> Self {
        Self {
            kind,
            files: Vec::new(),
            text: None,
            html: None,
        }
    }

    pub fn paste() -> Self {
        Self::new(PasteKind::Paste)
    }

    pub fn dropped() -> Self {
        Self::new(PasteKind::Drop)
    }

    pub fn with_file(mut self, file: ClipboardFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}

/// What a paste handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteDisposition {
    /// The handler took care of the event; the host must suppress its default behavior.
    Consumed,
    /// The host should apply its default behavior.
    Default,
}
