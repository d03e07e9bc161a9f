//! Maintenance Scheduler
//!
//! Decides, per write, whether to run a full expired-entry sweep.
//!
//! A sweep costs one scan of the namespace. Running it with probability `p`
//! bounds the expected scan rate to one every `1/p` writes while still
//! reclaiming expired entries eventually. This is a cost heuristic and gives
//! no per-call guarantee; lookups check expiry themselves.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// == Sweep Scheduler ==
#[derive(Debug, Clone)]
pub struct SweepScheduler {
    probability: f64,
    rng: StdRng,
}

impl SweepScheduler {
    /// Creates a scheduler seeded from OS entropy. `probability` is clamped
    /// to `[0, 1]`.
    pub fn new(probability: f64) -> Self {
        Self::with_rng(probability, StdRng::from_entropy())
    }

    /// Creates a scheduler with a reproducible sample sequence.
    pub fn seeded(probability: f64, seed: u64) -> Self {
        Self::with_rng(probability, StdRng::seed_from_u64(seed))
    }

    fn with_rng(probability: f64, rng: StdRng) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { probability, rng }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    // == Should Sweep ==
    /// True iff `sample`, drawn uniformly from `[0, 1)`, falls below the
    /// sweep probability.
    pub fn should_sweep(&self, sample: f64) -> bool {
        sample < self.probability
    }

    /// Draws a sample and applies `should_sweep`.
    pub fn roll(&mut self) -> bool {
        let sample: f64 = self.rng.gen();
        self.should_sweep(sample)
    }
}
