//! Synthetic Logging Session
//!
//! Runs the datalogger against a directory-backed volume with simulated
//! drive telemetry, the way the device firmware would feed it from real
//! sensors. Any storage fault stops the run immediately, the same way
//! the firmware halts on a bad card.
//!
//! Usage:
//!   cargo run --example log_session -- [DIR] [SECONDS]
//!
//! Arguments:
//!   DIR       Directory standing in for the card (default: demo-logs)
//!   SECONDS   How long a session to simulate (default: 5)

use anyhow::Context;

use mulelog_core::demo::DriveSimulator;
use mulelog_core::prelude::*;

/// Simulated telemetry rate, samples per second
const SAMPLE_HZ: u32 = 50;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let dir = args.next().unwrap_or_else(|| "demo-logs".to_string());
    let seconds: u32 = args
        .next()
        .as_deref()
        .unwrap_or("5")
        .parse()
        .context("SECONDS must be an integer")?;

    let volume = DirVolume::new(&dir);
    let mut logger = DataLogger::new(volume, StorageConfig::default());
    logger.begin("mule").context("failed to start logging session")?;

    println!(
        "Logging {} seconds of simulated telemetry to {}/{}",
        seconds,
        dir,
        logger.file_name().unwrap_or("?")
    );

    let mut sim = DriveSimulator::new();
    let ticks = seconds * SAMPLE_HZ;
    for _ in 0..ticks {
        logger
            .add_entry(sim.next_sample())
            .context("storage fault while logging")?;
    }

    let tail = logger.flush().context("failed to flush session tail")?;
    println!("Wrote {} samples ({} flushed at session end)", ticks, tail);

    Ok(())
}
