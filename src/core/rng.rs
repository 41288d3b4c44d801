//! Deterministic random source
//!
//! Every stochastic decision in a tick draws from a single `RandomSource`
//! owned by the population. It is passed by `&mut` into each phase, so two
//! runs with the same seed and the same call sequence draw identical values.

use rand::seq::index;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded generator of uniform reals and integers
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Reset the stream to the start of `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Uniform real in [0, 1)
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Bernoulli trial: true with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Full-range 64-bit draw
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform integer in [0, n). `n` must be nonzero.
    pub fn below(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Uniform integer in [0, max] inclusive
    pub fn up_to(&mut self, max: u32) -> u32 {
        self.rng.gen_range(0..=max)
    }

    /// Uniform random permutation in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// `amount` distinct positions drawn from `0..length` without replacement
    pub fn distinct_positions(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }
}
