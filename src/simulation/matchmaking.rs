//! Marriage system (monogamous mode only)
//!
//! Unmarried adults are split by gender, each side is shuffled, and
//! candidates are paired positionally.

use crate::core::rng::RandomSource;
use crate::core::types::Gender;
use crate::entity::Roster;
use crate::genetics::IncestGuard;
use crate::simulation::environment::Environment;

/// Form this year's marriages. Returns the number of couples formed.
pub fn arrange_marriages(roster: &mut Roster, env: &Environment, rng: &mut RandomSource) -> usize {
    let mut females = Vec::new();
    let mut males = Vec::new();
    for (slot, person) in roster.people().iter().enumerate() {
        if person.is_married() || person.age < env.age_of_consent {
            continue;
        }
        match person.gender {
            Gender::Female => females.push(slot),
            Gender::Male => males.push(slot),
        }
    }
    rng.shuffle(&mut females);
    rng.shuffle(&mut males);

    let pressure = env.crowding_pressure(roster.len());
    let p_marry = (env.marriage_probability * pressure).clamp(0.0, 1.0);
    let guard = IncestGuard::new(env.incest_threshold);

    let mut formed = 0;
    for (&f, &m) in females.iter().zip(males.iter()) {
        let (bride, groom) = roster.pair_mut(f, m);
        // A slot can only be paired once per batch
        if bride.is_married() || groom.is_married() {
            continue;
        }
        if guard.blocked(&bride.genome, &groom.genome) {
            continue;
        }
        if rng.chance(p_marry) {
            bride.marry(groom.id);
            groom.marry(bride.id);
            formed += 1;
        }
    }

    tracing::trace!(
        candidates = females.len().min(males.len()),
        formed,
        p_marry,
        "marriages arranged"
    );
    formed
}
