//! Genome - 128-bit kinship fingerprint
//!
//! The genome carries no phenotype. It only exists so that two persons can
//! be compared for similarity before they are allowed to mate.

use serde::{Deserialize, Serialize};

use crate::core::types::GENOME_BITS;

/// Two opaque 64-bit words forming a 128-bit genome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genome {
    pub g0: u64,
    pub g1: u64,
}

impl Genome {
    pub fn new(g0: u64, g1: u64) -> Self {
        Self { g0, g1 }
    }

    /// Number of bit positions (0..=128) where both genomes agree
    pub fn matching_bits(&self, other: &Genome) -> u32 {
        (!(self.g0 ^ other.g0)).count_ones() + (!(self.g1 ^ other.g1)).count_ones()
    }

    /// Number of bit positions where the genomes differ
    pub fn differing_bits(&self, other: &Genome) -> u32 {
        GENOME_BITS - self.matching_bits(other)
    }

    /// Flip a single bit, positions 0..64 live in `g0`, 64..128 in `g1`
    pub fn flip(&mut self, position: u32) {
        debug_assert!(position < GENOME_BITS);
        if position < 64 {
            self.g0 ^= 1u64 << position;
        } else {
            self.g1 ^= 1u64 << (position - 64);
        }
    }
}

/// Blocks mating between genomes that are too similar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncestGuard {
    /// Maximum allowed number of equal bits
    pub threshold: u32,
}

impl IncestGuard {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// True when the genomes share strictly more than `threshold` bits
    pub fn blocked(&self, a: &Genome, b: &Genome) -> bool {
        a.matching_bits(b) > self.threshold
    }
}
