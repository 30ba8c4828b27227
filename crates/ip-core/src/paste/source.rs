use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;

use super::event::PasteEvent;
use super::mime::MimeType;

/// `![alt](http(s)://...)`; only the URL is captured.
static IMAGE_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[[^\]]*\]\((https?://[^)\s]+)\)").expect("image markup pattern is valid")
});

/// Where the bytes of one pasted image come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Raw file content carried by the event.
    Bytes {
        data: Bytes,
        mime: MimeType,
        file_name: Option<String>,
    },
    /// Remote image referenced from pasted markup.
    Url(String),
}

impl ImageSource {
    /// Short description for logs; never includes the payload.
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Bytes { data, mime, .. } => format!("{} bytes of {}", data.len(), mime),
            ImageSource::Url(url) => url.clone(),
        }
    }
}

/// Extract every image source from a paste or drop event, in payload order.
///
/// Image files win: when the event carries at least one file with an `image/*`
/// type, those files are the sources. Otherwise the plain text and then the HTML
/// payloads are scanned for image markup with an `http(s)` target; a URL seen in
/// both payloads is reported once.
pub fn extract_image_sources(event: &PasteEvent) -> Vec<ImageSource> {
    let files: Vec<ImageSource> = event
        .files
        .iter()
        .filter(|file| file.mime.is_image())
        .map(|file| ImageSource::Bytes {
            data: file.data.clone(),
            mime: file.mime.clone(),
            file_name: Some(file.name.clone()).filter(|name| !name.is_empty()),
        })
        .collect();
    if !files.is_empty() {
        return files;
    }

    let mut urls: Vec<String> = Vec::new();
    for payload in [event.text.as_deref(), event.html.as_deref()].into_iter().flatten() {
        for url in image_urls(payload) {
            if !urls.iter().any(|seen| seen == url) {
                urls.push(url.to_string());
            }
        }
    }
    urls.into_iter().map(ImageSource::Url).collect()
}

/// All image URLs referenced by markup in `payload`, in order of appearance.
pub fn image_urls(payload: &str) -> impl Iterator<Item = &str> {
    IMAGE_MARKUP
        .captures_iter(payload)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}
