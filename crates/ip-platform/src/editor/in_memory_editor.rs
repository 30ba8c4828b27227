use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use ip_core::ids::EditorId;
use ip_core::paste::{PasteDisposition, PasteEvent};
use ip_core::ports::{EditorBufferPort, EditorInstancePort, PasteHandler};
use tracing::trace;

use super::text_buffer::TextBuffer;

/// The editor's built-in paste behavior: leaves the event to the default action.
///
/// Counts the events it receives so callers can tell whether a paste was
/// forwarded or consumed.
#[derive(Debug, Default)]
pub struct NativePasteHandler {
    received: AtomicUsize,
}

impl NativePasteHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }
}

impl PasteHandler for NativePasteHandler {
    fn on_paste(&self, event: &PasteEvent) -> PasteDisposition {
        self.received.fetch_add(1, Ordering::SeqCst);
        trace!(kind = ?event.kind, "Native paste handler invoked");
        PasteDisposition::Default
    }
}

/// Editor instance backed by a [`TextBuffer`].
///
/// Holds one replaceable paste-handler slot, the way a host editor view does.
pub struct InMemoryEditor {
    id: EditorId,
    buffer: Arc<TextBuffer>,
    handler: RwLock<Arc<dyn PasteHandler>>,
}

impl InMemoryEditor {
    /// Create an editor whose paste handler is a fresh [`NativePasteHandler`].
    pub fn new(id: impl Into<EditorId>, text: impl Into<String>) -> Self {
        Self::with_handler(id, text, Arc::new(NativePasteHandler::new()))
    }

    pub fn with_handler(
        id: impl Into<EditorId>,
        text: impl Into<String>,
        handler: Arc<dyn PasteHandler>,
    ) -> Self {
        Self {
            id: id.into(),
            buffer: Arc::new(TextBuffer::new(text)),
            handler: RwLock::new(handler),
        }
    }

    /// Concrete buffer, for callers that need more than the port offers.
    pub fn text_buffer(&self) -> &Arc<TextBuffer> {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Deliver a paste/drop event to whatever handler currently owns the slot.
    pub fn dispatch(&self, event: &PasteEvent) -> PasteDisposition {
        let handler = self.paste_handler();
        handler.on_paste(event)
    }
}

impl EditorInstancePort for InMemoryEditor {
    fn id(&self) -> EditorId {
        self.id.clone()
    }

    fn buffer(&self) -> Arc<dyn EditorBufferPort> {
        self.buffer.clone()
    }

    fn paste_handler(&self) -> Arc<dyn PasteHandler> {
        self.handler
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_paste_handler(&self, handler: Arc<dyn PasteHandler>) {
        *self
            .handler
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = handler;
    }
}
