//! Genetics - kinship fingerprints and inheritance
//!
//! Genomes are compared bit-for-bit to block close-kin mating, and
//! newborn genomes are built by per-bit recombination plus mutation.

pub mod genome;
pub mod inheritance;

pub use genome::{Genome, IncestGuard};
pub use inheritance::{mutate, offspring, recombine, Offspring};
