use crate::paste::{PasteDisposition, PasteEvent};

/// Receiver of native paste/drop events for one editor instance.
pub trait PasteHandler: Send + Sync {
    fn on_paste(&self, event: &PasteEvent) -> PasteDisposition;
}
