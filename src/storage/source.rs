//! Text sources and write-back
//!
//! A [`TextSource`] is one channel a document can be read from and written
//! back to: a buffer selection, a whole buffer, a file or a pair of streams.
//! [`clear_source`] runs the transformation against any of them.

use std::io::{self, Read, Stdin, Stdout, Write};

use thiserror::Error;

use super::buffer::Buffer;
use crate::domain::{clear_counted, Cleared};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Nothing is selected")]
    NoSelection,

    #[error("Failed to read {label}")]
    Read {
        label: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {label}")]
    Write {
        label: String,
        #[source]
        source: io::Error,
    },
}

/// A channel holding text that can be read and written back
pub trait TextSource {
    /// Human-readable name used in messages
    fn label(&self) -> String;

    /// Obtains the current text
    fn read(&mut self) -> Result<String, SourceError>;

    /// Commits `text` as the new content of the same channel
    fn write_back(&mut self, text: &str) -> Result<(), SourceError>;
}

/// When [`clear_source`] writes its result back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Always write, even if nothing changed
    Always,
    /// Write only if at least one line was removed
    #[default]
    IfChanged,
    /// Never write (dry run)
    Never,
}

impl WriteMode {
    /// Returns true if a result with `removed` lines gone gets written
    pub fn writes(self, removed: usize) -> bool {
        match self {
            WriteMode::Always => true,
            WriteMode::IfChanged => removed > 0,
            WriteMode::Never => false,
        }
    }
}

/// Reads `source`, clears completed items and writes the result back
pub fn clear_source(source: &mut dyn TextSource, mode: WriteMode) -> Result<Cleared, SourceError> {
    let text = source.read()?;
    let cleared = clear_counted(&text);

    if mode.writes(cleared.removed) {
        source.write_back(&cleared.text)?;
    }

    Ok(cleared)
}

/// The selected part of a buffer
pub struct SelectionSource<'a> {
    buffer: &'a mut Buffer,
}

impl<'a> SelectionSource<'a> {
    pub fn new(buffer: &'a mut Buffer) -> Self {
        Self { buffer }
    }
}

impl TextSource for SelectionSource<'_> {
    fn label(&self) -> String {
        match self.buffer.selection() {
            Some(range) => format!("selection {}..{}", range.start, range.end),
            None => "selection".to_string(),
        }
    }

    fn read(&mut self) -> Result<String, SourceError> {
        self.buffer
            .selected_text()
            .map(str::to_string)
            .ok_or(SourceError::NoSelection)
    }

    fn write_back(&mut self, text: &str) -> Result<(), SourceError> {
        if self.buffer.selection().is_none() {
            return Err(SourceError::NoSelection);
        }
        self.buffer.replace_selection(text);
        Ok(())
    }
}

/// A whole buffer
pub struct DocumentSource<'a> {
    buffer: &'a mut Buffer,
}

impl<'a> DocumentSource<'a> {
    pub fn new(buffer: &'a mut Buffer) -> Self {
        Self { buffer }
    }
}

impl TextSource for DocumentSource<'_> {
    fn label(&self) -> String {
        "document".to_string()
    }

    fn read(&mut self) -> Result<String, SourceError> {
        Ok(self.buffer.text().to_string())
    }

    fn write_back(&mut self, text: &str) -> Result<(), SourceError> {
        self.buffer.set_text(text);
        Ok(())
    }
}

/// Reads everything from one stream and writes to another
pub struct StreamSource<R, W> {
    reader: R,
    writer: W,
}

impl StreamSource<Stdin, Stdout> {
    /// Standard input to standard output
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: Read, W: Write> StreamSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Returns the underlying reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read, W: Write> TextSource for StreamSource<R, W> {
    fn label(&self) -> String {
        "<stdin>".to_string()
    }

    fn read(&mut self) -> Result<String, SourceError> {
        let mut text = String::new();
        self.reader
            .read_to_string(&mut text)
            .map_err(|source| SourceError::Read {
                label: self.label(),
                source,
            })?;
        Ok(text)
    }

    fn write_back(&mut self, text: &str) -> Result<(), SourceError> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|source| SourceError::Write {
                label: "<stdout>".to_string(),
                source,
            })
    }
}
