// talos_sim/src/rng.rs

//! The process-wide simulation random source.
//!
//! Constructed once by the host (seeded from the wall clock, or from a
//! fixed seed for reproducible runs) and passed by `&mut` to each model at
//! creation. Models never reseed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

use talos_core::localization::{DriftError, DriftMaxima};

/// A newtype wrapper around `ChaCha8Rng`. This is the central,
/// deterministic pseudo-random number generator for the simulation.
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    /// Seed from the wall clock, once, at process start.
    pub fn seed_from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        SimulationRng(ChaCha8Rng::seed_from_u64(nanos))
    }

    /// Fixed seed, for deterministic runs and tests.
    pub fn from_seed(seed: u64) -> Self {
        SimulationRng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Draw the three drift coefficients for a new model, each uniform in
    /// `(-max/2, +max/2)` for its axis. Only the magnitude of a maximum
    /// matters; a negative value from a world file bounds the same interval.
    pub fn sample_drift(&mut self, maxima: DriftMaxima) -> DriftError {
        let mut axis = |max: f64| {
            let half = max.abs() / 2.0;
            if half == 0.0 {
                0.0
            } else {
                self.0.gen_range(-half..half)
            }
        };
        DriftError {
            x: axis(maxima.x),
            y: axis(maxima.y),
            a: axis(maxima.a),
        }
    }
}
