//! Seeded random number generation
//!
//! Every stochastic decision in the pipeline routes through `DungeonRng` so
//! that a `(seed, options)` pair uniquely determines the output. The string
//! seed is reduced to a `u64` by hashing, then drives a ChaCha stream, which
//! is reproducible across platforms.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SLUG_LENGTH: usize = 10;

/// Deterministic integer generator seeded by a slug-style string
#[derive(Clone, Debug)]
pub struct DungeonRng {
    seed: String,
    rng: ChaCha8Rng,
    draws: u64,
}

impl DungeonRng {
    /// Seed from the given string
    pub fn from_seed(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        let rng = ChaCha8Rng::seed_from_u64(hash_seed(&seed));
        Self {
            seed,
            rng,
            draws: 0,
        }
    }

    /// Seed from a freshly generated slug
    pub fn from_random_slug() -> Self {
        Self::from_seed(generate_slug())
    }

    /// The seed string in use (auto-generated slug included)
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of integer draws made so far. Draw counts per pipeline step
    /// are part of the determinism contract and are pinned by tests.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    /// Uniform integer in `min..=max`. Panics if `max < min`.
    pub fn int_between(&mut self, min: i32, max: i32) -> i32 {
        assert!(
            max >= min,
            "int_between: max ({}) is below min ({})",
            max,
            min
        );
        self.draws += 1;
        self.rng.gen_range(min..=max)
    }

    /// True with probability 1/n
    pub fn one_in(&mut self, n: i32) -> bool {
        self.int_between(1, n) == 1
    }
}

/// Reduce a seed string to a `u64` stream seed
fn hash_seed(seed: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    hasher.finish()
}

/// Short alphanumeric slug for runs without an explicit seed
pub fn generate_slug() -> String {
    let mut rng = rand::thread_rng();
    (0..SLUG_LENGTH)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_stream() {
        let mut a = DungeonRng::from_seed("s1");
        let mut b = DungeonRng::from_seed("s1");
        for _ in 0..100 {
            assert_eq!(a.int_between(0, 1000), b.int_between(0, 1000));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = DungeonRng::from_seed("s1");
        let mut b = DungeonRng::from_seed("s2");
        let draws_a: Vec<i32> = (0..32).map(|_| a.int_between(0, 1_000_000)).collect();
        let draws_b: Vec<i32> = (0..32).map(|_| b.int_between(0, 1_000_000)).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn test_int_between_is_inclusive() {
        let mut rng = DungeonRng::from_seed("bounds");
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..1000 {
            let v = rng.int_between(2, 4);
            assert!((2..=4).contains(&v));
            seen_min |= v == 2;
            seen_max |= v == 4;
        }
        assert!(seen_min && seen_max, "both endpoints should be reachable");
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = DungeonRng::from_seed("one");
        assert_eq!(rng.int_between(7, 7), 7);
    }

    #[test]
    #[should_panic(expected = "int_between")]
    fn test_inverted_range_panics() {
        let mut rng = DungeonRng::from_seed("bad");
        rng.int_between(5, 4);
    }

    #[test]
    fn test_one_in_one_is_certain() {
        let mut rng = DungeonRng::from_seed("certain");
        for _ in 0..20 {
            assert!(rng.one_in(1));
        }
    }

    #[test]
    fn test_draw_count_advances_per_draw() {
        let mut rng = DungeonRng::from_seed("count");
        assert_eq!(rng.draw_count(), 0);
        rng.int_between(0, 9);
        rng.one_in(4);
        assert_eq!(rng.draw_count(), 2);
    }

    #[test]
    fn test_slug_shape() {
        let slug = generate_slug();
        assert_eq!(slug.len(), 10);
        assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(slug, slug.to_lowercase());
    }

    #[test]
    fn test_seed_is_kept_verbatim() {
        let rng = DungeonRng::from_seed("My Seed 42");
        assert_eq!(rng.seed(), "My Seed 42");
    }
}
