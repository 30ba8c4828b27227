//! In-memory editor host.
//! 内存中的编辑器宿主实现。

mod in_memory_editor;
mod text_buffer;

pub use in_memory_editor::{InMemoryEditor, NativePasteHandler};
pub use text_buffer::TextBuffer;
