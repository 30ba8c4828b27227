use std::path::{Component, Path};

use chrono::{DateTime, Utc};
use ip_core::paste::MimeType;

const FALLBACK_EXTENSION: &str = "png";

/// `image-<UTC yyyyMMddHHmmssSSS>-<4 hex>.<ext>`
pub(crate) fn image_file_name(now_ms: i64, suffix: u16, extension: &str) -> String {
    let at = DateTime::<Utc>::from_timestamp_millis(now_ms).unwrap_or_else(Utc::now);
    format!(
        "image-{}-{:04x}.{}",
        at.format("%Y%m%d%H%M%S%3f"),
        suffix,
        extension
    )
}

/// Pick the file extension for a stored image.
///
/// Order: declared MIME type, sniffed content, the extension of `location`
/// (URL path or original file name), then `png`.
pub(crate) fn resolve_extension(
    mime: Option<&MimeType>,
    data: &[u8],
    location: Option<&str>,
) -> String {
    if let Some(ext) = mime.and_then(MimeType::image_extension) {
        return ext.to_string();
    }
    if let Some(ext) = image::guess_format(data)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
    {
        return ext.to_string();
    }
    if let Some(ext) = location.and_then(path_extension) {
        return ext;
    }
    FALLBACK_EXTENSION.to_string()
}

fn path_extension(location: &str) -> Option<String> {
    let path = match location.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => location,
    };
    let path = path.split(['?', '#']).next().unwrap_or("");
    let segment = path.rsplit(['/', '\\']).next()?;
    let (_, ext) = segment.rsplit_once('.')?;

    let valid = !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

/// Components of a target directory that stays below the document root.
///
/// Returns `None` when the directory climbs out (`..`) or is absolute.
pub(crate) fn contained_parts(target_dir: &Path) -> Option<Vec<String>> {
    target_dir
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(Some(part.to_string_lossy().into_owned())),
            Component::CurDir => None,
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => Some(None),
        })
        .collect()
}

/// Reference written into the embed markup: target directory parts and file name joined by `/`.
pub(crate) fn reference_for(parts: &[String], file_name: &str) -> String {
    let mut reference = parts.join("/");
    if !reference.is_empty() {
        reference.push('/');
    }
    reference.push_str(file_name);
    reference
}
