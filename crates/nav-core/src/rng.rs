//! Deterministic RNG wrapper for simulated sensors.
//!
//! Simulated location sources (demo walks, soak tests) draw positional
//! jitter and accuracy noise from a `SimRng` seeded explicitly, so the same
//! seed always produces the same sample stream.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG used by simulated sources.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Symmetric uniform noise in `[-amplitude, amplitude]`; zero when the
    /// amplitude is not positive.
    #[inline]
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        if amplitude > 0.0 {
            self.0.gen_range(-amplitude..=amplitude)
        } else {
            0.0
        }
    }
}
