//! Storage seam
//!
//! The logger never talks to a filesystem directly; it writes through the
//! [`Volume`] and [`LogFile`] traits so the medium can be a real mount
//! point, a plain directory, or an in-memory fake.

mod dir;
mod mem;

pub use dir::{DirFile, DirVolume};
pub use mem::{MemFile, MemVolume};

use thiserror::Error;

use crate::config::StorageConfig;

/// Errors reported by a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("volume mount failed: {0}")]
    Mount(String),

    #[error("file already exists: {0}")]
    AlreadyExists(String),

    #[error("volume not mounted")]
    NotMounted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A mountable storage medium that can create session files.
///
/// `create_exclusive` must fail with [`StorageError::AlreadyExists`] when
/// the name is taken; the logger's file-naming loop treats that as normal
/// flow, not a fault.
pub trait Volume {
    /// Open file handle type produced by this volume
    type File: LogFile;

    /// Mount/initialize the medium with the given bus configuration
    fn mount(&mut self, config: &StorageConfig) -> Result<(), StorageError>;

    /// Create a new file, failing if a file of that name already exists
    fn create_exclusive(&mut self, name: &str) -> Result<Self::File, StorageError>;
}

/// An open, append-only file on a mounted volume
pub trait LogFile {
    /// Append one line of text; a newline terminator is added by the backend
    fn append_line(&mut self, line: &str) -> Result<(), StorageError>;

    /// Force buffered writes out to the physical medium
    fn sync(&mut self) -> Result<(), StorageError>;

    /// Whether the handle has recorded a write error since it was opened
    fn has_write_error(&self) -> bool;
}
