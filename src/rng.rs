// src/rng.rs

//! Pseudorandom sources for the effects.
//!
//! `Rand8` is the cheap deterministic generator the fire simulation draws
//! from on every cell. It is a plain value owned by the caller, so two
//! generators built from the same seed replay the same sequence.
//!
//! `Rand16` is the seam for the external 16-bit generator used only to seed
//! noise parameters. Any `rand::RngCore` can serve.

use rand::RngCore;

/// Seed used by `Rand8::default()`.
pub const DEFAULT_SEED: u16 = 1337;

const MULTIPLIER: u16 = 2053;
const INCREMENT: u16 = 13849;

/// 16-bit linear congruential generator with 8-bit output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rand8 {
    seed: u16,
}

impl Default for Rand8 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Rand8 {
    pub fn new(seed: u16) -> Self {
        Self { seed }
    }

    /// Current internal state.
    pub fn seed(&self) -> u16 {
        self.seed
    }

    /// Advances the state and returns the sum of its two bytes.
    pub fn rand8(&mut self) -> u8 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        let [lo, hi] = self.seed.to_le_bytes();
        lo.wrapping_add(hi)
    }

    /// Returns a value in `[0, max)`, or 0 when `max` is 0.
    ///
    /// Always consumes one draw. The result is slightly biased for bounds
    /// that are not powers of two.
    pub fn rand8_bdry(&mut self, max: u8) -> u8 {
        ((self.rand8() as u16 * max as u16) >> 8) as u8
    }
}

/// Source of uniformly distributed 16-bit values.
pub trait Rand16 {
    fn rand16(&mut self) -> u16;
}

impl<R: RngCore> Rand16 for R {
    fn rand16(&mut self) -> u16 {
        self.next_u32() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_log::test;

    #[test]
    fn default_seed_sequence_is_pinned() {
        let mut rng = Rand8::default();
        let drawn: Vec<u8> = (0..5).map(|_| rng.rand8()).collect();
        assert_eq!(drawn, vec![78, 134, 37, 236, 21]);
    }

    #[test]
    fn same_seed_replays_same_sequence() {
        let mut a = Rand8::new(42);
        let mut b = Rand8::new(42);
        for _ in 0..1000 {
            assert_eq!(a.rand8(), b.rand8());
        }
        assert_eq!(a, b);
    }

    #[test]
    fn bounded_draws_stay_below_max() {
        let mut rng = Rand8::new(7);
        for max in 1..=255u8 {
            for _ in 0..50 {
                assert!(rng.rand8_bdry(max) < max);
            }
        }
    }

    #[test]
    fn zero_bound_yields_zero_but_advances() {
        let mut rng = Rand8::default();
        let before = rng.seed();
        assert_eq!(rng.rand8_bdry(0), 0);
        assert_ne!(rng.seed(), before);
    }

    #[test]
    fn rand16_comes_from_any_rng_core() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        assert_eq!(a.rand16(), b.rand16());
    }
}
