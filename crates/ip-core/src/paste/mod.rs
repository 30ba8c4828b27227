//! Paste/drop events, image source extraction and the interception policy.

mod decision;
mod event;
mod mime;
mod source;

pub use decision::{decide, PassThroughReason, PasteDecision};
pub use event::{ClipboardFile, PasteDisposition, PasteEvent, PasteKind};
pub use mime::MimeType;
pub use source::{extract_image_sources, image_urls, ImageSource};
