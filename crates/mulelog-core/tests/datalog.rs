use std::io::Cursor;

use pretty_assertions::assert_eq;

use mulelog_core::datalog::{read_log, DatalogError, MAX_FILE_INDEX};
use mulelog_core::prelude::*;

const HEADER_LINE: &str = "Millis,throttle,Left,Right,Steering Angle,Wheel Speed";

fn sample(i: u32) -> Sample {
    Sample::new(i * 20, 500 + i as u16, -(i as i16), i as i16, i as f64 / 4.0, 100 + i as u16)
}

fn started_logger(base: &str) -> (MemVolume, DataLogger<MemVolume>) {
    let volume = MemVolume::new();
    let mut logger = DataLogger::new(volume.clone(), StorageConfig::default());
    logger.begin(base).unwrap();
    (volume, logger)
}

#[test]
fn test_fresh_volume_gets_index_zero_and_header() {
    let (volume, logger) = started_logger("session");

    assert_eq!(logger.file_name(), Some("session0.csv"));
    let contents = volume.contents("session0.csv").unwrap();
    assert_eq!(contents.lines().next(), Some(HEADER_LINE));
}

#[test]
fn test_no_flush_below_capacity() {
    let (volume, mut logger) = started_logger("log");
    for i in 0..9 {
        logger.add_entry(sample(i)).unwrap();
    }

    assert_eq!(logger.len(), 9);
    let contents = volume.contents("log0.csv").unwrap();
    assert_eq!(contents, format!("{}\n", HEADER_LINE));
}

#[test]
fn test_tenth_entry_flushes_in_order() {
    let (volume, mut logger) = started_logger("log");
    for i in 0..10 {
        logger.add_entry(sample(i)).unwrap();
    }

    assert_eq!(logger.len(), 0);
    let contents = volume.contents("log0.csv").unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], HEADER_LINE);
    // Rows come out in insertion order
    assert_eq!(lines[1], "0,500,0,0,0.00,100");
    assert_eq!(lines[10], "180,509,-9,9,2.25,109");
}

#[test]
fn test_batching_cadence() {
    let (volume, mut logger) = started_logger("log");
    // N = 10k + r with k = 2, r = 3
    for i in 0..23 {
        logger.add_entry(sample(i)).unwrap();
    }

    assert_eq!(logger.len(), 3);
    let contents = volume.contents("log0.csv").unwrap();
    assert_eq!(contents.lines().count(), 21); // header + 2 full batches
}

#[test]
fn test_row_is_bit_exact() {
    let (volume, mut logger) = started_logger("log");
    logger
        .add_entry(Sample::new(1234, 500, -10, 20, 3.14159, 800))
        .unwrap();
    logger.flush().unwrap();

    let contents = volume.contents("log0.csv").unwrap();
    assert_eq!(contents.lines().nth(1), Some("1234,500,-10,20,3.14,800"));
}

#[test]
fn test_naming_skips_existing_files() {
    let volume = MemVolume::new();
    volume.touch("log0.csv");
    volume.touch("log1.csv");

    let mut logger = DataLogger::new(volume.clone(), StorageConfig::default());
    logger.begin("log").unwrap();

    assert_eq!(logger.file_name(), Some("log2.csv"));
    // Earlier sessions are untouched
    assert_eq!(volume.contents("log0.csv").unwrap(), "");
    assert_eq!(volume.contents("log1.csv").unwrap(), "");
    assert_eq!(
        volume.file_names(),
        vec!["log0.csv", "log1.csv", "log2.csv"]
    );
}

#[test]
fn test_mount_failure_creates_nothing() {
    let volume = MemVolume::new().fail_mount();
    let mut logger = DataLogger::new(volume.clone(), StorageConfig::default());

    let err = logger.begin("log").unwrap_err();
    assert!(matches!(err, DatalogError::Mount(_)));
    assert!(volume.file_names().is_empty());
    assert!(!logger.is_started());

    // The session never started, so entries are refused
    let err = logger.add_entry(sample(0)).unwrap_err();
    assert!(matches!(err, DatalogError::NotStarted));
}

#[test]
fn test_header_sync_failure_fails_begin() {
    let volume = MemVolume::new().fail_sync_after(0);
    let mut logger = DataLogger::new(volume, StorageConfig::default());

    let err = logger.begin("log").unwrap_err();
    assert!(matches!(err, DatalogError::SyncFailed(_)));
    assert!(!logger.is_started());
}

#[test]
fn test_sync_failure_surfaces_on_filling_call() {
    // One successful sync (the header), then the medium goes bad
    let volume = MemVolume::new().fail_sync_after(1);
    let mut logger = DataLogger::new(volume, StorageConfig::default());
    logger.begin("log").unwrap();

    for i in 0..9 {
        logger.add_entry(sample(i)).unwrap();
    }
    let err = logger.add_entry(sample(9)).unwrap_err();
    assert!(matches!(err, DatalogError::SyncFailed(_)));
}

#[test]
fn test_name_space_exhaustion_is_reported() {
    let volume = MemVolume::new().reject_creates();
    let mut logger = DataLogger::new(volume, StorageConfig::default());

    let err = logger.begin("log").unwrap_err();
    match err {
        DatalogError::FileIndexExhausted { base, max } => {
            assert_eq!(base, "log");
            assert_eq!(max, MAX_FILE_INDEX);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_flush_drains_partial_buffer() {
    let (volume, mut logger) = started_logger("log");
    for i in 0..3 {
        logger.add_entry(sample(i)).unwrap();
    }

    assert_eq!(logger.flush().unwrap(), 3);
    assert_eq!(logger.len(), 0);
    assert_eq!(logger.flush().unwrap(), 0);

    let contents = volume.contents("log0.csv").unwrap();
    assert_eq!(contents.lines().count(), 4);
}

#[test]
fn test_reader_round_trips_logged_samples() {
    let (volume, mut logger) = started_logger("log");
    // Steering values representable at two decimals survive the trip exactly
    let samples = [
        Sample::new(0, 100, -5, 5, 1.25, 40),
        Sample::new(20, 200, -4, 6, -0.50, 60),
        Sample::new(40, 300, -3, 7, 12.00, 80),
    ];
    for s in samples {
        logger.add_entry(s).unwrap();
    }
    logger.flush().unwrap();

    let contents = volume.contents("log0.csv").unwrap();
    let parsed = read_log(Cursor::new(contents)).unwrap();
    assert_eq!(parsed, samples);
}
