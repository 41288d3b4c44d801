//! Aging and mortality
//!
//! Every person ages one year and draws once against the dying curve, in
//! storage order. Survivors are then copied into a fresh arena, and any
//! survivor whose spouse died this year is unmarried on the way.

use ahash::AHashSet;

use crate::core::rng::RandomSource;
use crate::core::types::PersonId;
use crate::entity::{Person, Roster};
use crate::simulation::environment::Environment;

/// Age everyone, remove the dead, unlink widowed partners.
/// Returns the number of deaths.
pub fn age_and_cull(roster: &mut Roster, env: &Environment, rng: &mut RandomSource) -> usize {
    let mut people = roster.take();
    let mut dead: AHashSet<PersonId> = AHashSet::new();
    let mut fates = Vec::with_capacity(people.len());

    for person in people.iter_mut() {
        person.grow_older();
        let dies = rng.chance(env.dying_curve.probability_at(person.age));
        if dies {
            dead.insert(person.id);
        }
        fates.push(dies);
    }

    let deaths = dead.len();
    let mut widowed = 0;
    let survivors: Vec<Person> = people
        .into_iter()
        .zip(fates)
        .filter(|(_, dies)| !dies)
        .map(|(mut person, _)| {
            if person.partner().is_some_and(|partner| dead.contains(&partner)) {
                person.unmarry();
                widowed += 1;
            }
            person
        })
        .collect();

    roster.replace(survivors);
    tracing::trace!(deaths, widowed, survivors = roster.len(), "mortality applied");
    deaths
}
