use serde::{Deserialize, Serialize};

/// A (line, column) location inside an editor buffer.
///
/// Lines are zero-based and split on `\n`. Columns are UTF-8 byte offsets
/// within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Half-open range `[from, to)` covering one located occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedRange {
    pub from: Position,
    pub to: Position,
}

/// Find the first occurrence of `needle` in `text`, scanning line by line.
///
/// The first line containing the needle wins; inside that line only its first
/// occurrence is reported. An empty needle never matches.
pub fn locate_first(text: &str, needle: &str) -> Option<LocatedRange> {
    if needle.is_empty() {
        return None;
    }

    text.split('\n').enumerate().find_map(|(line, content)| {
        content.find(needle).map(|column| LocatedRange {
            from: Position::new(line, column),
            to: Position::new(line, column + needle.len()),
        })
    })
}

/// Translate a position into a byte offset of `text`.
///
/// Returns `None` when the line does not exist, the column is past the end of
/// the line, or the column does not fall on a character boundary.
pub fn byte_offset(text: &str, position: Position) -> Option<usize> {
    let mut line_start = 0;
    for (index, content) in text.split('\n').enumerate() {
        if index == position.line {
            if position.column > content.len() || !content.is_char_boundary(position.column) {
                return None;
            }
            return Some(line_start + position.column);
        }
        line_start += content.len() + 1;
    }
    None
}
