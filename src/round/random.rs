//! Injectable randomness for target selection

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples in [0, 1)
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded PCG stream, the default for rounds
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed cycle of samples (handy for tests and scripted demos)
#[derive(Debug, Clone)]
pub struct Scripted {
    samples: Vec<f32>,
    cursor: usize,
}

impl Scripted {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// Always returns the middle of every range
    pub fn midpoint() -> Self {
        Self::new(vec![0.5])
    }
}

impl RandomSource for Scripted {
    fn next_unit(&mut self) -> f32 {
        if self.samples.is_empty() {
            return 0.5;
        }
        let value = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0)
    }
}
