//! Conception system
//!
//! Two mutually exclusive yearly flows: married couples conceive in
//! monogamous mode, and every fertile woman draws a random fertile man in
//! polygamous mode. Only persons present when the phase starts take part;
//! children born during the phase are appended behind them.

use crate::core::rng::RandomSource;
use crate::core::types::{Gender, PersonId};
use crate::entity::Roster;
use crate::genetics::{offspring, IncestGuard};
use crate::simulation::environment::Environment;

/// Married-couple conception. Returns the number of births.
pub fn conceive_monogamous(roster: &mut Roster, env: &Environment, rng: &mut RandomSource) -> usize {
    let pressure = env.crowding_pressure(roster.len());
    let p_child = (env.conceiving_probability * pressure).clamp(0.0, 1.0);
    let guard = IncestGuard::new(env.incest_threshold);

    let mut births = 0;
    for slot in 0..roster.len() {
        let Some(mother) = roster.get(slot) else { break };
        if mother.gender != Gender::Female
            || mother.age < env.age_of_consent
            || !env.female_fertile(mother.age)
        {
            continue;
        }
        let Some(father_slot) = mother.partner().and_then(|id| roster.find(id)) else {
            continue;
        };
        let Some(father) = roster.get(father_slot) else { continue };
        if father.gender != Gender::Male
            || father.age < env.age_of_consent
            || guard.blocked(&mother.genome, &father.genome)
            || !env.male_fertile(father.age)
        {
            continue;
        }
        if rng.chance(p_child) {
            add_child(roster, slot, father_slot, env, rng);
            births += 1;
        }
    }

    tracing::trace!(births, p_child, "monogamous conception");
    births
}

/// Random-father conception. Marital state is ignored.
/// Returns the number of births.
pub fn conceive_polygamous(roster: &mut Roster, env: &Environment, rng: &mut RandomSource) -> usize {
    let pressure = env.polygamy_pressure(roster.len());
    let p_child = (env.conceiving_probability * pressure).clamp(0.0, 1.0);
    let guard = IncestGuard::new(env.incest_threshold);

    let fathers: Vec<usize> = roster
        .people()
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            p.gender == Gender::Male && p.age >= env.age_of_consent && env.male_fertile(p.age)
        })
        .map(|(slot, _)| slot)
        .collect();
    if fathers.is_empty() {
        tracing::trace!("no eligible fathers, skipping polygamous conception");
        return 0;
    }

    let mothers = roster.len();
    let mut births = 0;
    for slot in 0..mothers {
        let Some(mother) = roster.get(slot) else { break };
        if mother.gender != Gender::Female
            || mother.age < env.age_of_consent
            || !env.female_fertile(mother.age)
        {
            continue;
        }
        let father_slot = fathers[rng.below(fathers.len())];
        let Some(father) = roster.get(father_slot) else { continue };
        if guard.blocked(&mother.genome, &father.genome) {
            continue;
        }
        if rng.chance(p_child) {
            add_child(roster, slot, father_slot, env, rng);
            births += 1;
        }
    }

    tracing::trace!(births, p_child, fathers = fathers.len(), "polygamous conception");
    births
}

/// Build a newborn from two parents and append it to the roster
fn add_child(
    roster: &mut Roster,
    mother_slot: usize,
    father_slot: usize,
    env: &Environment,
    rng: &mut RandomSource,
) -> Option<PersonId> {
    let mother = roster.get(mother_slot)?.genome;
    let father = roster.get(father_slot)?.genome;
    let child = offspring(&mother, &father, env.mutation_bits, rng);
    Some(roster.spawn_newborn(child.genome, child.gender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::Genome;
    use crate::simulation::environment::PressureModel;

    fn fertile_env() -> Environment {
        Environment {
            resources: 1e12,
            conceiving_probability: 1.0,
            incest_threshold: 128,
            age_of_consent: 18,
            ..Default::default()
        }
    }

    fn spawn_aged(roster: &mut Roster, gender: Gender, genome: Genome, age: u32) -> PersonId {
        let id = roster.spawn_newborn(genome, gender);
        let slot = roster.find(id).unwrap();
        roster.get_mut(slot).unwrap().age = age;
        id
    }

    fn wed(roster: &mut Roster, a: PersonId, b: PersonId) {
        let (sa, sb) = (roster.find(a).unwrap(), roster.find(b).unwrap());
        let (x, y) = roster.pair_mut(sa, sb);
        x.marry(b);
        y.marry(a);
    }

    #[test]
    fn test_married_couple_conceives() {
        let mut roster = Roster::new();
        let f = spawn_aged(&mut roster, Gender::Female, Genome::new(0, 0), 25);
        let m = spawn_aged(&mut roster, Gender::Male, Genome::new(u64::MAX, u64::MAX), 30);
        wed(&mut roster, f, m);

        let mut rng = RandomSource::new(1);
        assert_eq!(conceive_monogamous(&mut roster, &fertile_env(), &mut rng), 1);
        assert_eq!(roster.len(), 3);

        let child = roster.get(2).unwrap();
        assert_eq!(child.age, 0);
        assert!(!child.is_married());
        assert_eq!(child.id, PersonId(3));
    }

    #[test]
    fn test_unmarried_do_not_conceive_monogamous() {
        let mut roster = Roster::new();
        spawn_aged(&mut roster, Gender::Female, Genome::new(0, 0), 25);
        spawn_aged(&mut roster, Gender::Male, Genome::new(1, 1), 30);
        let mut rng = RandomSource::new(1);
        assert_eq!(conceive_monogamous(&mut roster, &fertile_env(), &mut rng), 0);
    }

    #[test]
    fn test_fertility_window_gates_monogamous() {
        let mut roster = Roster::new();
        let f = spawn_aged(&mut roster, Gender::Female, Genome::new(0, 0), 50);
        let m = spawn_aged(&mut roster, Gender::Male, Genome::new(1, 1), 30);
        wed(&mut roster, f, m);
        let mut rng = RandomSource::new(1);
        assert_eq!(conceive_monogamous(&mut roster, &fertile_env(), &mut rng), 0);

        let old_father = Environment {
            male_fertility_max: 29,
            female_fertility_max: 60,
            ..fertile_env()
        };
        assert_eq!(conceive_monogamous(&mut roster, &old_father, &mut rng), 0);
    }

    #[test]
    fn test_incest_blocks_monogamous() {
        let mut roster = Roster::new();
        let g = Genome::new(99, 99);
        let f = spawn_aged(&mut roster, Gender::Female, g, 25);
        let m = spawn_aged(&mut roster, Gender::Male, g, 30);
        wed(&mut roster, f, m);
        let env = Environment {
            incest_threshold: 64,
            ..fertile_env()
        };
        let mut rng = RandomSource::new(1);
        assert_eq!(conceive_monogamous(&mut roster, &env, &mut rng), 0);
    }

    #[test]
    fn test_crowding_suppresses_monogamous_conception() {
        let mut roster = Roster::new();
        let f = spawn_aged(&mut roster, Gender::Female, Genome::new(0, 0), 25);
        let m = spawn_aged(&mut roster, Gender::Male, Genome::new(u64::MAX, u64::MAX), 30);
        wed(&mut roster, f, m);
        let mut rng = RandomSource::new(5);

        // population / resources >= 1, so pressure is 0
        let crowded = Environment {
            resources: 1.0,
            ..fertile_env()
        };
        assert_eq!(conceive_monogamous(&mut roster, &crowded, &mut rng), 0);
        assert_eq!(roster.len(), 2);

        // the inverted polygamous formula would still allow births here
        assert!((crowded.polygamy_pressure(roster.len()) - 0.5).abs() < 1e-12);

        assert_eq!(conceive_monogamous(&mut roster, &fertile_env(), &mut rng), 1);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_polygamous_without_fathers() {
        let mut roster = Roster::new();
        for _ in 0..4 {
            spawn_aged(&mut roster, Gender::Female, Genome::new(0, 0), 25);
        }
        let env = Environment {
            polygamy: true,
            ..fertile_env()
        };
        let mut rng = RandomSource::new(1);
        assert_eq!(conceive_polygamous(&mut roster, &env, &mut rng), 0);
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_polygamous_single_father_serves_all() {
        let mut roster = Roster::new();
        for _ in 0..5 {
            spawn_aged(&mut roster, Gender::Female, Genome::new(0, 0), 25);
        }
        spawn_aged(&mut roster, Gender::Male, Genome::new(u64::MAX, u64::MAX), 30);
        let env = Environment {
            polygamy: true,
            polygamy_pressure: PressureModel::PopulationRatio,
            ..fertile_env()
        };
        let mut rng = RandomSource::new(1);
        assert_eq!(conceive_polygamous(&mut roster, &env, &mut rng), 5);
        assert_eq!(roster.len(), 11);
    }

    #[test]
    fn test_polygamous_ignores_marital_state() {
        let mut roster = Roster::new();
        let wife = spawn_aged(&mut roster, Gender::Female, Genome::new(0, 0), 25);
        // husband is past male fertility, so only the stranger can father
        let husband = spawn_aged(&mut roster, Gender::Male, Genome::new(u64::MAX, u64::MAX), 70);
        let stranger = spawn_aged(&mut roster, Gender::Male, Genome::new(u64::MAX, u64::MAX), 30);
        spawn_aged(&mut roster, Gender::Female, Genome::new(0, 0), 22);
        wed(&mut roster, wife, husband);

        let env = Environment {
            polygamy: true,
            polygamy_pressure: PressureModel::PopulationRatio,
            ..fertile_env()
        };
        let mut rng = RandomSource::new(9);
        assert_eq!(conceive_polygamous(&mut roster, &env, &mut rng), 2);
        assert_eq!(roster.len(), 6);

        let wife_slot = roster.find(wife).unwrap();
        assert!(roster.get(wife_slot).unwrap().is_married_to(husband));
        let stranger_slot = roster.find(stranger).unwrap();
        assert!(!roster.get(stranger_slot).unwrap().is_married());
    }

    #[test]
    fn test_polygamous_inverted_pressure_damps_small_populations() {
        let mut roster = Roster::new();
        spawn_aged(&mut roster, Gender::Female, Genome::new(0, 0), 25);
        spawn_aged(&mut roster, Gender::Male, Genome::new(u64::MAX, u64::MAX), 30);
        // resources / population >= 1, so pressure is 0
        let env = Environment {
            polygamy: true,
            resources: 1000.0,
            ..fertile_env()
        };
        let mut rng = RandomSource::new(1);
        assert_eq!(conceive_polygamous(&mut roster, &env, &mut rng), 0);
    }

    #[test]
    fn test_newborns_do_not_conceive_same_phase() {
        let mut roster = Roster::new();
        spawn_aged(&mut roster, Gender::Female, Genome::new(0, 0), 25);
        spawn_aged(&mut roster, Gender::Male, Genome::new(u64::MAX, u64::MAX), 30);
        let env = Environment {
            polygamy: true,
            age_of_consent: 0,
            female_fertility_min: 0,
            male_fertility_min: 0,
            polygamy_pressure: PressureModel::PopulationRatio,
            ..fertile_env()
        };
        let mut rng = RandomSource::new(1);
        assert_eq!(conceive_polygamous(&mut roster, &env, &mut rng), 1);
        assert_eq!(roster.len(), 3);
    }
}
