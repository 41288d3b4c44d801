//! Child genome construction: per-bit recombination followed by mutation

use crate::core::rng::RandomSource;
use crate::core::types::{Gender, GENOME_BITS};
use crate::genetics::genome::Genome;

/// Unbiased per-bit coin flip between two parents.
///
/// Each word draws its own mask; a set mask bit takes the mother's bit.
pub fn recombine(mother: &Genome, father: &Genome, rng: &mut RandomSource) -> Genome {
    let m0 = rng.next_u64();
    let m1 = rng.next_u64();
    Genome {
        g0: (mother.g0 & m0) | (father.g0 & !m0),
        g1: (mother.g1 & m1) | (father.g1 & !m1),
    }
}

/// Flip exactly `bits` distinct positions chosen uniformly from the genome.
///
/// Requests above the genome width flip every bit. Returns the flipped
/// positions in draw order.
pub fn mutate(genome: &mut Genome, bits: u32, rng: &mut RandomSource) -> Vec<u32> {
    if bits == 0 {
        return Vec::new();
    }
    let positions: Vec<u32> = rng
        .distinct_positions(GENOME_BITS as usize, bits as usize)
        .into_iter()
        .map(|p| p as u32)
        .collect();
    for &p in &positions {
        genome.flip(p);
    }
    positions
}

/// Genome and gender of a newborn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offspring {
    pub genome: Genome,
    pub gender: Gender,
}

/// Recombine, draw a fair-coin gender, then mutate
pub fn offspring(
    mother: &Genome,
    father: &Genome,
    mutation_bits: u32,
    rng: &mut RandomSource,
) -> Offspring {
    let mut genome = recombine(mother, father, rng);
    let gender = Gender::from_bit(rng.next_u64());
    mutate(&mut genome, mutation_bits, rng);
    Offspring { genome, gender }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recombine_identical_parents() {
        let mut rng = RandomSource::new(1);
        let g = Genome::new(0xAAAA_5555_0F0F_F0F0, 0x0123_4567_89AB_CDEF);
        assert_eq!(recombine(&g, &g, &mut rng), g);
    }

    #[test]
    fn test_recombine_bits_come_from_a_parent() {
        let mut rng = RandomSource::new(2);
        let mother = Genome::new(0xFF00, 0);
        let father = Genome::new(0xF0F0, 0);
        for _ in 0..64 {
            let child = recombine(&mother, &father, &mut rng);
            // Bits both parents carry are always inherited
            assert_eq!(child.g0 & 0xF000, 0xF000);
            // Bits neither parent carries never appear
            assert_eq!(child.g0 & !0xFFF0, 0);
            assert_eq!(child.g1, 0);
        }
    }

    #[test]
    fn test_mutate_zero_is_noop() {
        let mut rng = RandomSource::new(3);
        let mut g = Genome::new(5, 6);
        assert!(mutate(&mut g, 0, &mut rng).is_empty());
        assert_eq!(g, Genome::new(5, 6));
    }

    #[test]
    fn test_mutate_flips_exact_count() {
        let mut rng = RandomSource::new(4);
        for k in [1u32, 7, 64, 127, 128] {
            let before = Genome::new(0x1357_9BDF, 0x2468_ACE0);
            let mut after = before;
            let positions = mutate(&mut after, k, &mut rng);
            assert_eq!(positions.len(), k as usize);
            assert_eq!(before.differing_bits(&after), k);
        }
    }

    #[test]
    fn test_mutate_caps_at_genome_width() {
        let mut rng = RandomSource::new(5);
        let mut g = Genome::default();
        mutate(&mut g, 300, &mut rng);
        assert_eq!(g, Genome::new(u64::MAX, u64::MAX));
    }

    #[test]
    fn test_offspring_deterministic() {
        let mother = Genome::new(11, 22);
        let father = Genome::new(33, 44);
        let a = offspring(&mother, &father, 3, &mut RandomSource::new(9));
        let b = offspring(&mother, &father, 3, &mut RandomSource::new(9));
        assert_eq!(a, b);
    }
}
