//! Person - the individual entity record

use serde::{Deserialize, Serialize};

use crate::core::types::{Gender, PersonId};
use crate::genetics::Genome;

/// Packed marital field
///
/// Bit 0 is the married flag, bits 1..64 hold the partner id.
/// The all-zero value means unmarried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marital(pub u64);

impl Marital {
    pub const UNMARRIED: Marital = Marital(0);

    /// Pack a partner reference
    pub fn married_to(partner: PersonId) -> Self {
        Marital((partner.0 << 1) | 1)
    }

    pub fn is_married(&self) -> bool {
        self.0 & 1 != 0
    }

    /// Partner id, only meaningful while married
    pub fn partner(&self) -> Option<PersonId> {
        self.is_married().then(|| PersonId(self.0 >> 1))
    }
}

/// A simulated individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub genome: Genome,
    /// Whole years, saturating
    pub age: u32,
    pub gender: Gender,
    pub marital: Marital,
}

impl Person {
    /// Newborn: age 0, unmarried
    pub fn newborn(id: PersonId, genome: Genome, gender: Gender) -> Self {
        Self {
            id,
            genome,
            age: 0,
            gender,
            marital: Marital::UNMARRIED,
        }
    }

    pub fn is_married(&self) -> bool {
        self.marital.is_married()
    }

    pub fn partner(&self) -> Option<PersonId> {
        self.marital.partner()
    }

    /// True if married and the packed partner is `other`
    pub fn is_married_to(&self, other: PersonId) -> bool {
        self.partner() == Some(other)
    }

    pub fn marry(&mut self, partner: PersonId) {
        self.marital = Marital::married_to(partner);
    }

    pub fn unmarry(&mut self) {
        self.marital = Marital::UNMARRIED;
    }

    /// Advance one year without wrapping
    pub fn grow_older(&mut self) {
        self.age = self.age.saturating_add(1);
    }
}
