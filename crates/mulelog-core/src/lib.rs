//! # Mulelog Core Library
//!
//! Core functionality for the mulelog vehicle telemetry datalogger.
//!
//! This library provides:
//! - A fixed-capacity sample buffer that batches telemetry records and
//!   writes them out as CSV rows (`datalog`)
//! - The storage seam the logger writes through, with a host-directory
//!   backend and an in-memory backend for testing (`storage`)
//! - Session log read-back for analysis (`datalog::reader`)
//! - A simulated drive session generator for running without a vehicle
//!   (`demo`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use mulelog_core::prelude::*;
//!
//! let volume = DirVolume::new("/media/sdcard");
//! let mut logger = DataLogger::new(volume, StorageConfig::default());
//!
//! logger.begin("mule")?;
//! logger.add_entry(Sample::new(1234, 500, -10, 20, 3.14159, 800))?;
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod datalog;
pub mod demo;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::StorageConfig;
    pub use crate::datalog::{DataLogger, DatalogError, Sample, BUFFER_CAPACITY};
    pub use crate::storage::{DirVolume, LogFile, MemVolume, StorageError, Volume};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
