//! Datalog errors

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during a logging session.
///
/// Every one of these is fatal to the session; the caller decides
/// whether to halt or degrade.
#[derive(Error, Debug)]
pub enum DatalogError {
    #[error("storage mount failed: {0}")]
    Mount(#[source] StorageError),

    #[error("log file base name is empty")]
    EmptyBaseName,

    #[error("no free file name for base '{base}' up to index {max}")]
    FileIndexExhausted {
        /// Base name the session asked for
        base: String,
        /// Highest index that was probed
        max: u32,
    },

    #[error("logging session already started")]
    AlreadyStarted,

    #[error("logging session not started")]
    NotStarted,

    #[error("log file sync failed: {0}")]
    SyncFailed(#[source] StorageError),

    #[error("log file handle reported a write error")]
    WriteError,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
