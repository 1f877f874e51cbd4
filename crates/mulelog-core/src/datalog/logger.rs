//! Sample buffer / datalogger
//!
//! Collects samples into a fixed ten-slot buffer; every call that fills
//! the buffer writes the whole batch to the session file and forces it
//! out to the medium, so one call in ten blocks on storage I/O and the
//! rest are plain memory writes.

use crate::config::StorageConfig;
use crate::storage::{LogFile, StorageError, Volume};

use super::{format, DatalogError, Sample};

/// Number of samples batched between writes to the medium
pub const BUFFER_CAPACITY: usize = 10;

/// Highest session file index probed before giving up on a base name
pub const MAX_FILE_INDEX: u32 = 9_999;

/// Buffered CSV datalogger bound to one storage volume.
///
/// Construct it with the volume and bus configuration, call [`begin`]
/// once to mount the medium and open a fresh session file, then feed it
/// samples with [`add_entry`]. The session file stays open for the life
/// of the logger.
///
/// [`begin`]: DataLogger::begin
/// [`add_entry`]: DataLogger::add_entry
pub struct DataLogger<V: Volume> {
    volume: V,
    config: StorageConfig,
    file: Option<V::File>,
    file_name: Option<String>,
    buffer: [Sample; BUFFER_CAPACITY],
    len: usize,
}

impl<V: Volume> DataLogger<V> {
    /// Create a logger that will write through `volume`
    pub fn new(volume: V, config: StorageConfig) -> Self {
        Self {
            volume,
            config,
            file: None,
            file_name: None,
            buffer: [Sample::default(); BUFFER_CAPACITY],
            len: 0,
        }
    }

    /// Mount the storage volume and open a fresh session file.
    ///
    /// The file is named `<base_name><index>.csv` for the smallest index
    /// whose name is free, so earlier sessions are never overwritten.
    /// The header row is written and synced before this returns.
    pub fn begin(&mut self, base_name: &str) -> Result<(), DatalogError> {
        if self.file.is_some() {
            return Err(DatalogError::AlreadyStarted);
        }
        if base_name.is_empty() {
            return Err(DatalogError::EmptyBaseName);
        }

        self.volume
            .mount(&self.config)
            .map_err(DatalogError::Mount)?;

        let (name, mut file) = self.create_session_file(base_name)?;
        Self::write_header(&mut file)?;
        tracing::info!(file = %name, "logging session started");

        self.file = Some(file);
        self.file_name = Some(name);
        self.len = 0;
        Ok(())
    }

    /// Buffer one sample.
    ///
    /// Field values are stored as-is; the logger does not validate
    /// ranges. The call that fills the buffer flushes all ten rows and
    /// syncs the medium, and reports any storage fault from doing so.
    pub fn add_entry(&mut self, sample: Sample) -> Result<(), DatalogError> {
        if self.file.is_none() {
            return Err(DatalogError::NotStarted);
        }
        self.buffer[self.len] = sample;
        self.len += 1;
        if self.len == BUFFER_CAPACITY {
            self.log_data()?;
        }
        Ok(())
    }

    /// Write out whatever is buffered without waiting for a full batch.
    ///
    /// Returns the number of rows written. Call this before power-down
    /// so the tail of a session is not lost.
    pub fn flush(&mut self) -> Result<usize, DatalogError> {
        if self.file.is_none() {
            return Err(DatalogError::NotStarted);
        }
        let written = self.len;
        self.log_data()?;
        Ok(written)
    }

    /// Number of samples currently buffered
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Buffer capacity (compile-time constant)
    pub fn capacity(&self) -> usize {
        BUFFER_CAPACITY
    }

    /// Whether `begin` has completed successfully
    pub fn is_started(&self) -> bool {
        self.file.is_some()
    }

    /// Name of the session file selected by `begin`
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Probe `<base_name><index>.csv` from index 0 upward until a free
    /// name is found.
    fn create_session_file(&mut self, base_name: &str) -> Result<(String, V::File), DatalogError> {
        for index in 0..=MAX_FILE_INDEX {
            let name = format!("{}{}.csv", base_name, index);
            match self.volume.create_exclusive(&name) {
                Ok(file) => return Ok((name, file)),
                Err(StorageError::AlreadyExists(_)) => {
                    tracing::debug!(file = %name, "name taken, trying next index");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(DatalogError::FileIndexExhausted {
            base: base_name.to_string(),
            max: MAX_FILE_INDEX,
        })
    }

    /// Write the buffered rows, reset the buffer, and force the batch
    /// out to the medium.
    fn log_data(&mut self) -> Result<(), DatalogError> {
        let file = self.file.as_mut().ok_or(DatalogError::NotStarted)?;
        // The count is taken down before writing: a batch that fails
        // partway is lost with the session, and the buffer index must
        // never be left at capacity.
        let count = self.len;
        self.len = 0;
        for sample in &self.buffer[..count] {
            file.append_line(&format::format_row(sample))?;
        }
        Self::sync_file(file)
    }

    /// Write the column title row and force it to the medium
    fn write_header(file: &mut V::File) -> Result<(), DatalogError> {
        file.append_line(format::HEADER)?;
        Self::sync_file(file)
    }

    fn sync_file(file: &mut V::File) -> Result<(), DatalogError> {
        file.sync().map_err(DatalogError::SyncFailed)?;
        if file.has_write_error() {
            return Err(DatalogError::WriteError);
        }
        Ok(())
    }
}
