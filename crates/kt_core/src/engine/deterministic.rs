//! Hash-based deterministic draws.
//!
//! Unlike the match RNG, these do not consume stream state: the result
//! depends only on (seed, tick, actor, subcase), so re-ordering decisions
//! inside a tick cannot shift later draws. Used for per-decision jitter in
//! the default AI.

use fxhash::FxHasher;
use std::hash::{Hash, Hasher};

/// Subcase constants, one per decision site.
pub mod subcase {
    /// Which teammate receives a pass.
    pub const PASS_TARGET: u32 = 0x0100;
    /// Pass power adjustment.
    pub const PASS_POWER: u32 = 0x0101;
    /// Shot aim along the goal mouth.
    pub const SHOT_TARGET_Y: u32 = 0x0200;
    /// Shot power adjustment.
    pub const SHOT_POWER: u32 = 0x0201;
    /// Shot curve.
    pub const SHOT_CURVE: u32 = 0x0202;
    /// Chase approach jitter.
    pub const CHASE_JITTER: u32 = 0x0300;
    /// Off-ball drift around the formation anchor.
    pub const HOLD_DRIFT: u32 = 0x0301;
}

#[inline]
fn mix(seed: u64, tick: u32, actor: usize, subcase: u32) -> u64 {
    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    tick.hash(&mut hasher);
    actor.hash(&mut hasher);
    subcase.hash(&mut hasher);
    hasher.finish()
}

/// Pick an index in `[0, options_count)`. Stable for identical inputs.
#[inline]
pub fn choice(seed: u64, tick: u32, actor: usize, subcase: u32, options_count: usize) -> usize {
    if options_count <= 1 {
        return 0;
    }
    (mix(seed, tick, actor, subcase) as usize) % options_count
}

/// Draw an f32 in `[min, max)`. Stable for identical inputs.
#[inline]
pub fn jitter_f32(seed: u64, tick: u32, actor: usize, subcase: u32, min: f32, max: f32) -> f32 {
    let t = (mix(seed, tick, actor, subcase) as f64) / (u64::MAX as f64);
    min + (max - min) * (t as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_stable() {
        let a = choice(12345, 100, 5, subcase::PASS_TARGET, 10);
        let b = choice(12345, 100, 5, subcase::PASS_TARGET, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_choice_in_range() {
        for options in 1..20 {
            let idx = choice(9, 77, 3, subcase::SHOT_TARGET_Y, options);
            assert!(idx < options);
        }
    }

    #[test]
    fn test_choice_degenerate() {
        assert_eq!(choice(1, 1, 1, subcase::PASS_TARGET, 0), 0);
        assert_eq!(choice(1, 1, 1, subcase::PASS_TARGET, 1), 0);
    }

    #[test]
    fn test_jitter_stable_and_bounded() {
        let a = jitter_f32(42, 500, 7, subcase::SHOT_POWER, 0.7, 1.0);
        let b = jitter_f32(42, 500, 7, subcase::SHOT_POWER, 0.7, 1.0);
        assert_eq!(a.to_bits(), b.to_bits());
        assert!((0.7..1.0).contains(&a));
    }

    #[test]
    fn test_subcases_separate_draws() {
        let a = jitter_f32(42, 500, 7, subcase::SHOT_POWER, 0.0, 1.0);
        let b = jitter_f32(42, 500, 7, subcase::PASS_POWER, 0.0, 1.0);
        // Equal would mean the subcase is not feeding the hash.
        assert_ne!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_distribution_roughly_uniform() {
        let mut counts = [0u32; 10];
        for tick in 0..1000 {
            counts[choice(42, tick, 5, subcase::PASS_TARGET, 10)] += 1;
        }
        for (bucket, &count) in counts.iter().enumerate() {
            assert!(
                count > 50 && count < 150,
                "bucket {} has {} (expected ~100)",
                bucket,
                count
            );
        }
    }
}
