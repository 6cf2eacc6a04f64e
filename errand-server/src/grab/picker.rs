//! Random selection for auto-grab
//!
//! Randomness is injected (`rand::Rng`) so selection is deterministic
//! under a seeded RNG in tests.

use rand::Rng;
use rand::seq::SliceRandom;

/// Pick one category uniformly at random from the rider's configured set.
pub fn pick_category<R: Rng + ?Sized>(rng: &mut R, categories: &[i64]) -> Option<i64> {
    categories.choose(rng).copied()
}

/// Pick an index into a shortlist of `len` candidates uniformly at random.
/// `len` must be non-zero.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_categories_yield_none() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_category(&mut rng, &[]), None);
    }

    #[test]
    fn picks_only_from_given_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let categories = [3, 5, 8];
        for _ in 0..100 {
            let picked = pick_category(&mut rng, &categories).unwrap();
            assert!(categories.contains(&picked));
        }
    }

    #[test]
    fn index_always_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in 1..=5 {
            for _ in 0..100 {
                assert!(pick_index(&mut rng, len) < len);
            }
        }
    }

    #[test]
    fn deterministic_under_seed() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let categories = [1, 2, 3, 4];
        for _ in 0..20 {
            assert_eq!(
                pick_category(&mut a, &categories),
                pick_category(&mut b, &categories)
            );
        }
    }

    #[test]
    fn covers_every_candidate_eventually() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[pick_index(&mut rng, 5)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
