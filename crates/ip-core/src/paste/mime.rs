use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MimeType(pub String);

impl MimeType {
    pub fn text_plain() -> Self {
        Self("text/plain".into())
    }
    pub fn text_html() -> Self {
        Self("text/html".into())
    }
    pub fn image_png() -> Self {
        Self("image/png".into())
    }
    pub fn octet_stream() -> Self {
        Self("application/octet-stream".into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_image(&self) -> bool {
        self.0.trim().to_ascii_lowercase().starts_with("image/")
    }

    /// File extension conventionally used for this image type, if known.
    pub fn image_extension(&self) -> Option<&'static str> {
        let essence = self.0.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Some("png"),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
            "image/gif" => Some("gif"),
            "image/webp" => Some("webp"),
            "image/bmp" | "image/x-ms-bmp" => Some("bmp"),
            "image/svg+xml" => Some("svg"),
            "image/tiff" => Some("tiff"),
            "image/x-icon" | "image/vnd.microsoft.icon" => Some("ico"),
            "image/avif" => Some("avif"),
            _ => None,
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MimeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MimeType(s.to_string()))
    }
}
