//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Number of whole years covered by the mortality curve.
/// Ages at or beyond the last index reuse the final entry.
pub const CURVE_LEN: usize = 128;

/// Total genome width in bits (two 64-bit words)
pub const GENOME_BITS: u32 = 128;

/// Unique identifier for persons
///
/// Ids are handed out monotonically and always stay below 2^63, so the
/// id fits in the upper 63 bits of a packed marital field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub u64);

impl PersonId {
    /// Largest id that can still be packed next to the married flag
    pub const MAX: PersonId = PersonId((1u64 << 63) - 1);

    pub fn new(id: u64) -> Self {
        debug_assert!(id <= Self::MAX.0, "person id {} exceeds 63 bits", id);
        Self(id)
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Biological sex of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Gender {
    Female = 0,
    Male = 1,
}

impl Gender {
    /// Map the low bit of a random draw to a gender
    pub fn from_bit(bit: u64) -> Self {
        if bit & 1 == 1 {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_id_max_fits_63_bits() {
        assert_eq!(PersonId::MAX.0 >> 63, 0);
        assert_eq!((PersonId::MAX.0 << 1) >> 1, PersonId::MAX.0);
    }

    #[test]
    fn test_person_id_ordering() {
        assert!(PersonId(1) < PersonId(2));
        assert_eq!(PersonId::new(7), PersonId(7));
    }

    #[test]
    fn test_gender_from_bit() {
        assert_eq!(Gender::from_bit(0), Gender::Female);
        assert_eq!(Gender::from_bit(1), Gender::Male);
        assert_eq!(Gender::from_bit(0xFFFF_FFFE), Gender::Female);
        assert_eq!(Gender::Male as u8, 1);
    }
}
