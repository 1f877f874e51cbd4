//! In-memory volume
//!
//! A storage backend that keeps files in a shared map, used by tests and
//! by anything that wants to run the logger without a medium attached.
//! Fault switches simulate the failure modes of a real card: mount
//! refusal, name collisions on every create, and sync failures after a
//! given number of successful syncs.
//!
//! Cloning a `MemVolume` clones the handle, not the files, so a test can
//! keep a handle for inspection while the logger owns its own.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::StorageConfig;

use super::{LogFile, StorageError, Volume};

type SharedFiles = Arc<Mutex<HashMap<String, Vec<u8>>>>;

fn lock(files: &SharedFiles) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
    files.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An in-memory storage volume with fault injection
#[derive(Debug, Clone, Default)]
pub struct MemVolume {
    files: SharedFiles,
    mounted: bool,
    fail_mount: bool,
    reject_creates: bool,
    fail_sync_after: Option<u32>,
}

impl MemVolume {
    /// Create an empty, healthy volume
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `mount` fail
    pub fn fail_mount(mut self) -> Self {
        self.fail_mount = true;
        self
    }

    /// Make every `create_exclusive` report the name as taken
    pub fn reject_creates(mut self) -> Self {
        self.reject_creates = true;
        self
    }

    /// Make file syncs fail once `syncs` of them have succeeded
    pub fn fail_sync_after(mut self, syncs: u32) -> Self {
        self.fail_sync_after = Some(syncs);
        self
    }

    /// Pre-create an empty file, as if left over from an earlier session
    pub fn touch(&self, name: &str) {
        lock(&self.files).entry(name.to_string()).or_default();
    }

    /// Synced contents of a file, if it exists
    pub fn contents(&self, name: &str) -> Option<String> {
        lock(&self.files)
            .get(name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Names of all files on the volume, sorted
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = lock(&self.files).keys().cloned().collect();
        names.sort();
        names
    }
}

impl Volume for MemVolume {
    type File = MemFile;

    fn mount(&mut self, _config: &StorageConfig) -> Result<(), StorageError> {
        if self.fail_mount {
            return Err(StorageError::Mount("simulated mount failure".to_string()));
        }
        self.mounted = true;
        Ok(())
    }

    fn create_exclusive(&mut self, name: &str) -> Result<Self::File, StorageError> {
        if !self.mounted {
            return Err(StorageError::NotMounted);
        }
        if self.reject_creates {
            return Err(StorageError::AlreadyExists(name.to_string()));
        }
        let mut files = lock(&self.files);
        if files.contains_key(name) {
            return Err(StorageError::AlreadyExists(name.to_string()));
        }
        files.insert(name.to_string(), Vec::new());
        Ok(MemFile {
            name: name.to_string(),
            files: Arc::clone(&self.files),
            pending: Vec::new(),
            syncs_done: 0,
            fail_sync_after: self.fail_sync_after,
            write_error: false,
        })
    }
}

/// An open file on a [`MemVolume`].
///
/// Appends land in a pending buffer and only reach the shared map on
/// `sync`, mirroring how a buffered card write behaves.
#[derive(Debug)]
pub struct MemFile {
    name: String,
    files: SharedFiles,
    pending: Vec<u8>,
    syncs_done: u32,
    fail_sync_after: Option<u32>,
    write_error: bool,
}

impl LogFile for MemFile {
    fn append_line(&mut self, line: &str) -> Result<(), StorageError> {
        self.pending.extend_from_slice(line.as_bytes());
        self.pending.push(b'\n');
        Ok(())
    }

    fn sync(&mut self) -> Result<(), StorageError> {
        if let Some(limit) = self.fail_sync_after {
            if self.syncs_done >= limit {
                self.write_error = true;
                return Err(StorageError::Io(io::Error::new(
                    io::ErrorKind::Other,
                    "simulated sync failure",
                )));
            }
        }
        self.syncs_done += 1;
        let mut files = lock(&self.files);
        if let Some(bytes) = files.get_mut(&self.name) {
            bytes.append(&mut self.pending);
        }
        Ok(())
    }

    fn has_write_error(&self) -> bool {
        self.write_error
    }
}
