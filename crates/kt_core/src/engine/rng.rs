//! Seeded randomness owned by the match.
//!
//! One generator per match; AI and stochastic gameplay logic draw from it.
//! The same seed with the same AI plug-ins reproduces the same output
//! stream. For per-decision jitter that must not depend on draw order, see
//! the hash-based helpers in [`crate::engine::deterministic`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct MatchRng {
    seed: u64,
    rng: ChaCha8Rng,
}

impl MatchRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The seed this generator was created from. Also keys the hash-based
    /// deterministic draws.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn roll(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform draw in `[min, max)`.
    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform index draw in `[0, len)`. Returns 0 for an empty range.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}
