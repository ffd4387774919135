//! Files on disk as text sources
//!
//! Write-back is atomic: the new content goes to a uniquely named temp file
//! next to the real file, under an exclusive lock, and is renamed over it.
//! Symlinks are resolved first, so the link survives and its target is the
//! file that gets replaced. If anything fails the original file is left as
//! it was and the temp file is removed.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use super::source::{SourceError, TextSource};

/// A text file addressed by path
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_locked(&self) -> io::Result<String> {
        let mut file = File::open(&self.path)?;

        // Shared lock is released when file is dropped
        file.lock_shared()?;

        let mut text = String::new();
        file.read_to_string(&mut text)?;
        Ok(text)
    }

    fn write_atomic(&self, text: &str) -> io::Result<()> {
        let target = fs::canonicalize(&self.path)?;
        let permissions = fs::metadata(&target)?.permissions();
        let dir = target.parent().unwrap_or(Path::new("."));

        // Dropping the temp file on an early return deletes it
        let temp = NamedTempFile::new_in(dir)?;
        temp.as_file().lock_exclusive()?;

        let mut writer = BufWriter::new(temp.as_file());
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        drop(writer);

        temp.as_file().sync_all()?;
        fs::set_permissions(temp.path(), permissions)?;

        temp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}

impl TextSource for FileSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&mut self) -> Result<String, SourceError> {
        self.read_locked().map_err(|source| SourceError::Read {
            label: self.label(),
            source,
        })
    }

    fn write_back(&mut self, text: &str) -> Result<(), SourceError> {
        self.write_atomic(text).map_err(|source| SourceError::Write {
            label: self.label(),
            source,
        })
    }
}
