use std::sync::{Mutex, MutexGuard};

use ip_core::placeholder::{byte_offset, Position};
use ip_core::ports::{EditorBufferPort, EditorError};

#[derive(Debug)]
struct BufferState {
    text: String,
    /// Byte offset of the caret.
    cursor: usize,
    /// Other end of the selection, if one is active.
    anchor: Option<usize>,
}

impl BufferState {
    fn selection(&self) -> (usize, usize) {
        match self.anchor {
            Some(anchor) => (anchor.min(self.cursor), anchor.max(self.cursor)),
            None => (self.cursor, self.cursor),
        }
    }

    fn offset(&self, position: Position) -> Result<usize, EditorError> {
        byte_offset(&self.text, position).ok_or_else(|| EditorError::out_of_range(position))
    }

    fn position_of(&self, offset: usize) -> Position {
        let before = &self.text[..offset];
        let line = before.matches('\n').count();
        let column = before.rfind('\n').map_or(offset, |newline| offset - newline - 1);
        Position::new(line, column)
    }

    /// Replace `[from, to)` and move caret/anchor so they keep pointing at the same text.
    fn splice(&mut self, from: usize, to: usize, text: &str) {
        self.text.replace_range(from..to, text);
        let shift = |offset: usize| {
            if offset >= to {
                offset - (to - from) + text.len()
            } else if offset > from {
                from + text.len()
            } else {
                offset
            }
        };
        self.cursor = shift(self.cursor);
        self.anchor = self.anchor.map(shift);
    }
}

/// Thread-safe text buffer with a caret and an optional selection.
///
/// Every operation takes the internal lock once, so each call is atomic with
/// respect to the others.
#[derive(Debug)]
pub struct TextBuffer {
    state: Mutex<BufferState>,
}

impl TextBuffer {
    /// Create a buffer holding `text` with the caret at its end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            state: Mutex::new(BufferState {
                text,
                cursor,
                anchor: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BufferState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// Replace the whole content; the caret moves to the end.
    pub fn set_text(&self, text: impl Into<String>) {
        let mut state = self.lock();
        state.text = text.into();
        state.cursor = state.text.len();
        state.anchor = None;
    }

    pub fn cursor(&self) -> Position {
        let state = self.lock();
        state.position_of(state.cursor)
    }

    /// Move the caret and drop any selection.
    pub fn set_cursor(&self, position: Position) -> Result<(), EditorError> {
        let mut state = self.lock();
        state.cursor = state.offset(position)?;
        state.anchor = None;
        Ok(())
    }

    /// Select `[from, to)`; the caret ends up at `to`.
    pub fn set_selection(&self, from: Position, to: Position) -> Result<(), EditorError> {
        let mut state = self.lock();
        let anchor = state.offset(from)?;
        let cursor = state.offset(to)?;
        state.anchor = Some(anchor);
        state.cursor = cursor;
        Ok(())
    }

    /// Currently selected text, empty when nothing is selected.
    pub fn selected_text(&self) -> String {
        let state = self.lock();
        let (from, to) = state.selection();
        state.text[from..to].to_string()
    }

    /// Remove line `line` together with its line break.
    pub fn delete_line(&self, line: usize) -> Result<(), EditorError> {
        let mut state = self.lock();
        let start = state.offset(Position::new(line, 0))?;
        let end = match state.text[start..].find('\n') {
            Some(newline) => start + newline + 1,
            None => state.text.len(),
        };
        // last line without a trailing break: take the preceding break instead
        let (from, to) = if end == state.text.len() && start > 0 && !state.text.ends_with('\n') {
            (start - 1, end)
        } else {
            (start, end)
        };
        state.splice(from, to, "");
        Ok(())
    }

    /// Insert `text` at `position` without moving the caret relative to its text.
    pub fn insert_at(&self, position: Position, text: &str) -> Result<(), EditorError> {
        let mut state = self.lock();
        let offset = state.offset(position)?;
        state.splice(offset, offset, text);
        Ok(())
    }

    pub fn line_count(&self) -> usize {
        self.lock().text.split('\n').count()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl EditorBufferPort for TextBuffer {
    fn full_text(&self) -> Result<String, EditorError> {
        Ok(self.text())
    }

    fn insert_at_cursor(&self, text: &str) -> Result<(), EditorError> {
        let mut state = self.lock();
        let (from, to) = state.selection();
        state.text.replace_range(from..to, text);
        state.cursor = from + text.len();
        state.anchor = None;
        Ok(())
    }

    fn replace_range(&self, text: &str, from: Position, to: Position) -> Result<(), EditorError> {
        let mut state = self.lock();
        let start = state.offset(from)?;
        let end = state.offset(to)?;
        if end < start {
            return Err(EditorError::out_of_range(to));
        }
        state.splice(start, end, text);
        Ok(())
    }
}
