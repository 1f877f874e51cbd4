//! Logger configuration
//!
//! Bus parameters for the storage medium, captured once when the logger is
//! constructed and immutable afterwards.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Storage bus configuration for the removable medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Chip-select line identifying the storage device on the bus
    #[serde(default = "default_chip_select")]
    pub chip_select: u8,

    /// SPI clock rate in kHz used to talk to the medium
    #[serde(default = "default_spi_clock_khz")]
    pub spi_clock_khz: u32,
}

fn default_chip_select() -> u8 {
    10
}

fn default_spi_clock_khz() -> u32 {
    4_000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            chip_select: default_chip_select(),
            spi_clock_khz: default_spi_clock_khz(),
        }
    }
}

impl StorageConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.chip_select, 10);
        assert_eq!(config.spi_clock_khz, 4_000);
    }

    #[test]
    fn test_json_round_trip() {
        let config = StorageConfig {
            chip_select: 4,
            spi_clock_khz: 8_000,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: StorageConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: StorageConfig = serde_json::from_str(r#"{"chip_select": 9}"#).unwrap();
        assert_eq!(config.chip_select, 9);
        assert_eq!(config.spi_clock_khz, 4_000);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logger.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"chip_select": 5, "spi_clock_khz": 2000}}"#).unwrap();

        let config = StorageConfig::from_json_file(&path).unwrap();
        assert_eq!(config.chip_select, 5);
        assert_eq!(config.spi_clock_khz, 2_000);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = StorageConfig::from_json_file("/nonexistent/logger.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
