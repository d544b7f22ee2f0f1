//! Seeded generator of bounded integers and derived booleans
//!
//! ## Contract
//!
//! - `generate_int(max)` returns a value in `[0, max)` and advances the
//!   internal state; `max <= 0` is a configuration error.
//! - `seed()` returns the ORIGINATING seed, not the current state, so a
//!   fresh generator built from it replays the whole sequence from the top.
//! - Deliberately not thread-safe: each instance is confined to the one
//!   case or column computation that owns it and is never shared across
//!   concurrently executing cases.

use specdrive_core::{Result, SpecError};

/// Deterministic pseudo-random source
///
/// Internally a splitmix64 stream: a 64-bit counter advanced by a fixed
/// odd increment, mixed into the output. Good enough statistical quality
/// for synthesizing test data, trivially reproducible, two machine words
/// of state.
#[derive(Debug, Clone)]
pub struct SourceGenerator {
    seed: u64,
    state: u64,
}

impl SourceGenerator {
    /// Create a generator that replays the sequence for `seed`
    ///
    /// This is the primary constructor: explicit seeds make data-driven
    /// runs reproducible.
    pub fn from_seed(seed: u64) -> Self {
        SourceGenerator { seed, state: seed }
    }

    /// Create a generator seeded from system entropy, for ad hoc runs
    pub fn random_numbers() -> Self {
        Self::from_seed(rand::random::<u64>())
    }

    /// The seed this generator was constructed from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    // splitmix64 step (Steele, Lea, Flood 2014)
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn draw_below(&mut self, max: u64) -> u64 {
        self.next_u64() % max
    }

    /// Generate an integer in `[0, max_value)`
    ///
    /// Fails with [`SpecError::InvalidBound`] when `max_value <= 0`.
    pub fn generate_int(&mut self, max_value: i64) -> Result<i64> {
        if max_value <= 0 {
            return Err(SpecError::InvalidBound(max_value));
        }
        Ok(self.draw_below(max_value as u64) as i64)
    }

    /// Generate a boolean, consuming one draw
    ///
    /// Equivalent to `generate_int(2) == 0`.
    pub fn generate_bool(&mut self) -> bool {
        self.draw_below(2) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_seed_replays_identical_sequence() {
        let mut a = SourceGenerator::from_seed(42);
        let mut b = SourceGenerator::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.generate_int(1000).unwrap(), b.generate_int(1000).unwrap());
            assert_eq!(a.generate_bool(), b.generate_bool());
        }
    }

    #[test]
    fn test_generated_ints_stay_in_range() {
        let mut gen = SourceGenerator::from_seed(7);
        for _ in 0..1000 {
            let v = gen.generate_int(10).unwrap();
            assert!((0..10).contains(&v));
        }
    }

    #[test]
    fn test_non_positive_bound_is_rejected() {
        let mut gen = SourceGenerator::from_seed(1);
        assert_eq!(gen.generate_int(0), Err(SpecError::InvalidBound(0)));
        assert_eq!(gen.generate_int(-5), Err(SpecError::InvalidBound(-5)));
    }

    #[test]
    fn test_rejected_bound_does_not_advance_state() {
        let mut gen = SourceGenerator::from_seed(9);
        let mut twin = SourceGenerator::from_seed(9);
        let _ = gen.generate_int(-1);
        assert_eq!(gen.generate_int(100), twin.generate_int(100));
    }

    #[test]
    fn test_seed_reports_origin_not_current_state() {
        let mut gen = SourceGenerator::from_seed(0xDEAD_BEEF);
        for _ in 0..10 {
            let _ = gen.generate_int(5).unwrap();
        }
        assert_eq!(gen.seed(), 0xDEAD_BEEF);

        // A fresh generator from the reported seed replays from the top
        let mut replay = SourceGenerator::from_seed(gen.seed());
        let mut original = SourceGenerator::from_seed(0xDEAD_BEEF);
        for _ in 0..10 {
            assert_eq!(
                replay.generate_int(5).unwrap(),
                original.generate_int(5).unwrap()
            );
        }
    }

    #[test]
    fn test_bound_one_always_yields_zero() {
        let mut gen = SourceGenerator::from_seed(3);
        for _ in 0..50 {
            assert_eq!(gen.generate_int(1).unwrap(), 0);
        }
    }

    #[test]
    fn test_entropy_seeded_generators_are_replayable() {
        let mut ad_hoc = SourceGenerator::random_numbers();
        let first: Vec<i64> = (0..20).map(|_| ad_hoc.generate_int(1000).unwrap()).collect();

        let mut replay = SourceGenerator::from_seed(ad_hoc.seed());
        let second: Vec<i64> = (0..20).map(|_| replay.generate_int(1000).unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bool_consumes_one_draw_like_int() {
        // Interleaving bools and ints keeps two same-seed generators in step
        let mut a = SourceGenerator::from_seed(11);
        let mut b = SourceGenerator::from_seed(11);
        let _ = a.generate_bool();
        let _ = b.generate_int(2).unwrap();
        assert_eq!(a.generate_int(100), b.generate_int(100));
    }

    proptest! {
        #[test]
        fn prop_values_in_range(seed: u64, max in 1i64..=10_000) {
            let mut gen = SourceGenerator::from_seed(seed);
            for _ in 0..50 {
                let v = gen.generate_int(max).unwrap();
                prop_assert!(v >= 0 && v < max);
            }
        }

        #[test]
        fn prop_determinism(seed: u64, max in 1i64..=10_000) {
            let mut a = SourceGenerator::from_seed(seed);
            let mut b = SourceGenerator::from_seed(seed);
            for _ in 0..50 {
                prop_assert_eq!(a.generate_int(max).unwrap(), b.generate_int(max).unwrap());
            }
        }
    }
}
