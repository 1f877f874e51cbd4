//! Demo Mode - Simulated drive session generator
//!
//! Produces plausible telemetry traces for exercising the logger without
//! a vehicle attached: throttle and steering wander toward randomly
//! chosen targets, speed follows throttle, and the encoder deltas pick up
//! a differential split when steering.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::datalog::Sample;

/// Sample period of the simulated telemetry loop (50 Hz)
const TICK_MS: u32 = 20;

/// Simulated test-mule drive session
pub struct DriveSimulator {
    rng: StdRng,
    time_ms: u32,
    throttle: f64,
    throttle_target: f64,
    steer: f64,
    steer_target: f64,
    speed: f64,
}

impl Default for DriveSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveSimulator {
    /// Create a simulator with a random seed
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a simulator with a fixed seed, for reproducible traces
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            time_ms: 0,
            throttle: 0.0,
            throttle_target: 0.0,
            steer: 0.0,
            steer_target: 0.0,
            speed: 0.0,
        }
    }

    /// Advance the simulation one tick and produce the next sample
    pub fn next_sample(&mut self) -> Sample {
        // Occasionally pick new targets, then ease toward them
        if self.rng.gen_ratio(1, 50) {
            self.throttle_target = self.rng.gen_range(0.0..1023.0);
        }
        if self.rng.gen_ratio(1, 80) {
            self.steer_target = self.rng.gen_range(-30.0..30.0);
        }
        self.throttle += (self.throttle_target - self.throttle) * 0.10;
        self.steer += (self.steer_target - self.steer) * 0.15;

        // Speed lags throttle; encoder counts split across the axle when
        // the wheels are turned
        let target_speed = self.throttle * 1.2;
        self.speed += (target_speed - self.speed) * 0.05;

        let base_counts = self.speed / 8.0;
        let split = base_counts * (self.steer / 90.0);
        let left = (base_counts - split).round() as i16;
        let right = (base_counts + split).round() as i16;

        let sample = Sample {
            time: self.time_ms,
            throttle: self.throttle.round() as u16,
            left,
            right,
            steer: self.steer,
            speed: self.speed.round() as u16,
        };
        self.time_ms = self.time_ms.wrapping_add(TICK_MS);
        sample
    }
}
