//! Log read-back
//!
//! Parses a recorded session file back into samples for analysis and
//! round-trip testing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use super::format::HEADER;
use super::Sample;

/// Errors that can occur while reading a session log back
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing or unrecognized header: '{0}'")]
    HeaderMismatch(String),

    #[error("line {line}: expected 6 fields, found {found}")]
    FieldCount {
        /// 1-based line number in the file
        line: usize,
        /// Number of comma-separated fields found
        found: usize,
    },

    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        /// 1-based line number in the file
        line: usize,
        /// Column the bad value was found in
        column: &'static str,
        /// The offending text
        value: String,
    },
}

/// Read a complete session log: the header line followed by zero or more
/// sample rows. Blank lines are skipped.
pub fn read_log<R: BufRead>(reader: R) -> Result<Vec<Sample>, ReadError> {
    let mut lines = reader.lines();
    let header = lines.next().transpose()?.unwrap_or_default();
    if header != HEADER {
        return Err(ReadError::HeaderMismatch(header));
    }

    let mut samples = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        samples.push(parse_row(&line, idx + 2)?);
    }
    Ok(samples)
}

/// Read a session log from a file on the host filesystem
pub fn read_log_file<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>, ReadError> {
    read_log(BufReader::new(File::open(path)?))
}

fn parse_row(line: &str, number: usize) -> Result<Sample, ReadError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 6 {
        return Err(ReadError::FieldCount {
            line: number,
            found: fields.len(),
        });
    }
    Ok(Sample {
        time: parse_field(fields[0], number, "time")?,
        throttle: parse_field(fields[1], number, "throttle")?,
        left: parse_field(fields[2], number, "left")?,
        right: parse_field(fields[3], number, "right")?,
        steer: parse_field(fields[4], number, "steer")?,
        speed: parse_field(fields[5], number, "speed")?,
    })
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    line: usize,
    column: &'static str,
) -> Result<T, ReadError> {
    value.parse().map_err(|_| ReadError::InvalidValue {
        line,
        column,
        value: value.to_string(),
    })
}
