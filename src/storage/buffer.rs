//! In-memory editable document
//!
//! A [`Buffer`] stands in for a host editor: it owns the document text, an
//! optional selection and a cursor. Offsets are byte offsets and always lie
//! on `char` boundaries.

use std::ops::Range;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("Range {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Range {start}..{end} is inverted")]
    Inverted { start: usize, end: usize },

    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("Invalid line range {start}:{end} (document has {count} lines)")]
    InvalidLines { start: usize, end: usize, count: usize },
}

/// Editable document with selection and cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    text: String,
    selection: Option<Range<usize>>,
    cursor: usize,
}

impl Buffer {
    /// Creates a buffer with the cursor at the start and nothing selected
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: None,
            cursor: 0,
        }
    }

    /// Creates a buffer with the given range selected
    pub fn with_selection(text: impl Into<String>, range: Range<usize>) -> Result<Self, BufferError> {
        let mut buffer = Self::new(text);
        buffer.select(range)?;
        Ok(buffer)
    }

    /// Returns the whole document
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the selected range, if it is non-empty
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone().filter(|r| !r.is_empty())
    }

    /// Returns the selected text, if any
    pub fn selected_text(&self) -> Option<&str> {
        self.selection().map(|r| &self.text[r])
    }

    /// Selects a range and moves the cursor to its end
    pub fn select(&mut self, range: Range<usize>) -> Result<(), BufferError> {
        self.check_range(&range)?;
        self.cursor = range.end;
        self.selection = Some(range);
        Ok(())
    }

    /// Returns the cursor offset
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor
    pub fn set_cursor(&mut self, offset: usize) -> Result<(), BufferError> {
        self.check_range(&(offset..offset))?;
        self.cursor = offset;
        Ok(())
    }

    /// Replaces the selected text
    ///
    /// The selection then spans the replacement and the cursor sits at its
    /// end. Without a selection, the text is inserted at the cursor.
    pub fn replace_selection(&mut self, replacement: &str) {
        let range = self
            .selection()
            .unwrap_or(self.cursor..self.cursor);

        self.text.replace_range(range.clone(), replacement);

        let end = range.start + replacement.len();
        self.selection = Some(range.start..end);
        self.cursor = end;
    }

    /// Replaces the whole document
    ///
    /// The selection is dropped and the cursor is clamped into the new text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = None;
        self.cursor = floor_char_boundary(&self.text, self.cursor);
    }

    /// Returns the byte range covering 1-based lines `start..=end`
    ///
    /// The range includes the terminator of the last line, if it has one.
    pub fn line_range(&self, start: usize, end: usize) -> Result<Range<usize>, BufferError> {
        let lines: Vec<&str> = self.text.split_inclusive('\n').collect();
        let count = lines.len();

        if start == 0 || start > end || end > count {
            return Err(BufferError::InvalidLines { start, end, count });
        }

        let from: usize = lines[..start - 1].iter().map(|l| l.len()).sum();
        let len: usize = lines[start - 1..end].iter().map(|l| l.len()).sum();
        Ok(from..from + len)
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), BufferError> {
        let len = self.text.len();
        if range.start > range.end {
            return Err(BufferError::Inverted {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > len {
            return Err(BufferError::OutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        for offset in [range.start, range.end] {
            if !self.text.is_char_boundary(offset) {
                return Err(BufferError::NotCharBoundary(offset));
            }
        }
        Ok(())
    }
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_has_no_selection() {
        let buffer = Buffer::new("hello");
        assert_eq!(buffer.selection(), None);
        assert_eq!(buffer.selected_text(), None);
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn empty_selection_counts_as_none() {
        let buffer = Buffer::with_selection("hello", 2..2).unwrap();
        assert_eq!(buffer.selection(), None);
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn select_rejects_bad_ranges() {
        let mut buffer = Buffer::new("héllo");

        assert_eq!(
            buffer.select(0..10),
            Err(BufferError::OutOfBounds { start: 0, end: 10, len: 6 })
        );
        assert_eq!(
            buffer.select(3..1),
            Err(BufferError::Inverted { start: 3, end: 1 })
        );
        assert_eq!(buffer.select(0..2), Err(BufferError::NotCharBoundary(2)));
        assert!(buffer.select(0..3).is_ok());
        assert_eq!(buffer.selected_text(), Some("hé"));
    }

    #[test]
    fn replace_selection_updates_range_and_cursor() {
        let mut buffer = Buffer::with_selection("one two three", 4..7).unwrap();
        buffer.replace_selection("2");

        assert_eq!(buffer.text(), "one 2 three");
        assert_eq!(buffer.selection(), Some(4..5));
        assert_eq!(buffer.cursor(), 5);
    }

    #[test]
    fn replace_without_selection_inserts_at_cursor() {
        let mut buffer = Buffer::new("ac");
        buffer.set_cursor(1).unwrap();
        buffer.replace_selection("b");

        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn set_text_clamps_cursor_and_drops_selection() {
        let mut buffer = Buffer::with_selection("a long document", 2..15).unwrap();
        buffer.set_text("éa");

        assert_eq!(buffer.text(), "éa");
        assert_eq!(buffer.selection(), None);
        assert_eq!(buffer.cursor(), 3);

        buffer.set_cursor(1).unwrap_err();
        buffer.set_cursor(2).unwrap();
        buffer.set_text("é");
        assert_eq!(buffer.cursor(), 2);
        buffer.set_text("x");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn line_range_covers_whole_lines() {
        let buffer = Buffer::new("a\nbb\nccc\nd");

        assert_eq!(buffer.line_range(1, 1), Ok(0..2));
        assert_eq!(buffer.line_range(2, 3), Ok(2..9));
        assert_eq!(buffer.line_range(4, 4), Ok(9..10));
        assert_eq!(
            buffer.line_range(0, 1),
            Err(BufferError::InvalidLines { start: 0, end: 1, count: 4 })
        );
        assert!(buffer.line_range(3, 2).is_err());
        assert!(buffer.line_range(1, 5).is_err());
    }
}
