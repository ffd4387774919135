//! # Storage Layer
//!
//! Where document text comes from and where the cleared text goes back to.
//!
//! ## Sources
//!
//! | Source | Reads | Writes back with |
//! |--------|-------|------------------|
//! | [`SelectionSource`] | Selected part of a [`Buffer`] | Selection replace |
//! | [`DocumentSource`] | Whole [`Buffer`] | Whole-document replace |
//! | [`FileSource`] | File on disk | Atomic overwrite (temp file + rename) |
//! | [`StreamSource`] | stdin | stdout |
//!
//! ## Concurrency Safety
//!
//! - [`FileSource`] holds a shared `fs2` lock while reading and an exclusive
//!   lock on the temp file while writing
//! - Read and write are separate steps; a concurrent external edit between
//!   them is overwritten (last writer wins)
//!
//! ## Key Types
//!
//! - [`TextSource`] - Read and write-back contract
//! - [`clear_source`] - Runs the transformation against a source
//! - [`Config`] - User configuration

mod buffer;
mod config;
mod file;
mod source;

pub use buffer::{Buffer, BufferError};
pub use config::{Config, ConfigError, DefaultFormat};
pub use file::FileSource;
pub use source::{
    clear_source, DocumentSource, SelectionSource, SourceError, StreamSource, TextSource, WriteMode,
};
