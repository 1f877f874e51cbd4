//! Directory-backed volume
//!
//! Uses a directory on the host filesystem as the storage medium. The bus
//! parameters in the config have no effect here; mounting just makes sure
//! the root directory exists.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::StorageConfig;

use super::{LogFile, StorageError, Volume};

/// A volume rooted at a host directory
#[derive(Debug)]
pub struct DirVolume {
    root: PathBuf,
    mounted: bool,
}

impl DirVolume {
    /// Create a volume rooted at `root`. Nothing is touched until `mount`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            mounted: false,
        }
    }

    /// Root directory this volume writes under
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl Volume for DirVolume {
    type File = DirFile;

    fn mount(&mut self, config: &StorageConfig) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Mount(format!("{}: {}", self.root.display(), e)))?;
        tracing::debug!(
            root = %self.root.display(),
            chip_select = config.chip_select,
            spi_clock_khz = config.spi_clock_khz,
            "directory volume mounted"
        );
        self.mounted = true;
        Ok(())
    }

    fn create_exclusive(&mut self, name: &str) -> Result<Self::File, StorageError> {
        if !self.mounted {
            return Err(StorageError::NotMounted);
        }
        let path = self.root.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => Ok(DirFile {
                writer: BufWriter::new(file),
                write_error: false,
            }),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(StorageError::AlreadyExists(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// An open file under a [`DirVolume`]
#[derive(Debug)]
pub struct DirFile {
    writer: BufWriter<File>,
    write_error: bool,
}

impl LogFile for DirFile {
    fn append_line(&mut self, line: &str) -> Result<(), StorageError> {
        if let Err(e) = writeln!(self.writer, "{}", line) {
            self.write_error = true;
            return Err(e.into());
        }
        Ok(())
    }

    fn sync(&mut self) -> Result<(), StorageError> {
        if let Err(e) = self.writer.flush() {
            self.write_error = true;
            return Err(e.into());
        }
        if let Err(e) = self.writer.get_ref().sync_all() {
            self.write_error = true;
            return Err(e.into());
        }
        Ok(())
    }

    fn has_write_error(&self) -> bool {
        self.write_error
    }
}
