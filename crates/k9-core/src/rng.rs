//! Deterministic RNG wrapper for fleet-level random choices.
//!
//! The only stochastic behavior in the engine is the fleet's spawn
//! algorithm (random station, random patrol route).  A single seeded
//! `SmallRng` keeps those picks reproducible in tests; production hosts
//! seed from entropy.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Fleet-level deterministic RNG.
pub struct PatrolRng(SmallRng);

impl PatrolRng {
    /// Seed deterministically — the same seed always produces the same
    /// sequence of spawn picks.
    pub fn new(seed: u64) -> Self {
        PatrolRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.  Returns `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
