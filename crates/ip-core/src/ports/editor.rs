use std::sync::Arc;

use crate::ids::EditorId;
use crate::placeholder::Position;
use crate::ports::errors::EditorError;
use crate::ports::paste_handler::PasteHandler;

/// Text-buffer API of one editor instance.
///
/// All calls are synchronous; each one is applied atomically by the host.
pub trait EditorBufferPort: Send + Sync {
    /// Entire current content, lines separated by `\n`.
    fn full_text(&self) -> Result<String, EditorError>;

    /// Insert `text` at the caret, replacing the current selection if any.
    fn insert_at_cursor(&self, text: &str) -> Result<(), EditorError>;

    /// Replace the half-open range `[from, to)` with `text`.
    fn replace_range(&self, text: &str, from: Position, to: Position) -> Result<(), EditorError>;
}

/// Interception capability of one editor instance.
///
/// The host exposes the paste-handler slot of the editor through this port; the
/// application never reaches into host internals.
///
/// 编辑器实例的粘贴拦截能力，由宿主提供。
pub trait EditorInstancePort: Send + Sync {
    fn id(&self) -> EditorId;

    fn buffer(&self) -> Arc<dyn EditorBufferPort>;

    /// Handler currently receiving paste/drop events.
    fn paste_handler(&self) -> Arc<dyn PasteHandler>;

    /// Route subsequent paste/drop events to `handler`.
    fn set_paste_handler(&self, handler: Arc<dyn PasteHandler>);
}
