//! Population - owns every person, the random source and the history
//!
//! Each yearly tick runs a fixed pipeline:
//! 1. Mating: marriages + conception, or polygamous conception
//! 2. Aging and mortality
//! 3. Metrics appended to history

use crate::core::error::{PopsimError, Result};
use crate::core::rng::RandomSource;
use crate::core::types::{Gender, PersonId};
use crate::entity::{Person, Roster};
use crate::genetics::Genome;
use crate::simulation::conception::{conceive_monogamous, conceive_polygamous};
use crate::simulation::environment::Environment;
use crate::simulation::history::{History, YearRecord};
use crate::simulation::matchmaking::arrange_marriages;
use crate::simulation::mortality::age_and_cull;

/// Seed used by `Population::default`
pub const DEFAULT_SEED: u64 = 0xC0FFEE;

/// Default upper bound for random starting ages
pub const DEFAULT_MAX_START_AGE: u32 = 60;

pub struct Population {
    env: Environment,
    roster: Roster,
    rng: RandomSource,
    history: History,
}

impl Population {
    pub fn new(seed: u64) -> Self {
        Self {
            env: Environment::default(),
            roster: Roster::new(),
            rng: RandomSource::new(seed),
            history: History::new(),
        }
    }

    /// Replace the whole environment
    pub fn set_environment(&mut self, env: Environment) {
        self.env = env;
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Value copy of the current environment
    pub fn get_environment(&self) -> Environment {
        self.env.clone()
    }

    /// Reset the random stream. Persons and history are untouched.
    pub fn reseed(&mut self, seed: u64) {
        tracing::info!(seed, "reseeding population rng");
        self.rng.reseed(seed);
    }

    /// Discard everyone and all history, then create `count` random
    /// unmarried persons aged uniformly in `0..=max_start_age`
    pub fn initialize_random(&mut self, count: usize, max_start_age: u32) {
        self.roster.clear();
        self.history.clear();

        for _ in 0..count {
            let g0 = self.rng.next_u64();
            let g1 = self.rng.next_u64();
            let age = self.rng.up_to(max_start_age);
            let gender = if self.rng.up_to(1) == 1 { Gender::Male } else { Gender::Female };

            let id = self.roster.allocate_id();
            let mut person = Person::newborn(id, Genome::new(g0, g1), gender);
            person.age = age;
            self.roster.push(person);
        }

        tracing::info!(
            count,
            max_start_age,
            next_id = self.roster.peek_next_id().0,
            "initialized random population"
        );
    }

    /// Advance the simulation by `years` ticks
    pub fn step(&mut self, years: u32) {
        for _ in 0..years {
            self.do_year();
        }
    }

    /// Boundary form of `step` for signed callers
    pub fn try_step(&mut self, years: i64) -> Result<()> {
        let years = u32::try_from(years).map_err(|_| {
            PopsimError::InvalidArgument(format!(
                "years must be between 0 and {}, got {}",
                u32::MAX,
                years
            ))
        })?;
        self.step(years);
        Ok(())
    }

    fn do_year(&mut self) {
        let births = if self.env.polygamy {
            conceive_polygamous(&mut self.roster, &self.env, &mut self.rng)
        } else {
            arrange_marriages(&mut self.roster, &self.env, &mut self.rng);
            conceive_monogamous(&mut self.roster, &self.env, &mut self.rng)
        };

        let deaths = age_and_cull(&mut self.roster, &self.env, &mut self.rng);

        let record = YearRecord {
            births,
            deaths,
            mean_age: self.roster.mean_age(),
            population: self.roster.len(),
        };
        self.history.record(record);

        tracing::debug!(
            year = self.history.len(),
            births,
            deaths,
            population = record.population,
            mean_age = record.mean_age,
            "year complete"
        );
    }

    /// Living persons in storage order
    pub fn persons(&self) -> &[Person] {
        self.roster.people()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Look up a living person by id
    pub fn find(&self, id: PersonId) -> Option<&Person> {
        self.roster.find(id).and_then(|slot| self.roster.get(slot))
    }

    pub fn married_count(&self) -> usize {
        self.roster.married_count()
    }

    /// Years simulated since the last `initialize_random`
    pub fn years_elapsed(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mean_age_history(&self) -> &[f64] {
        self.history.mean_age()
    }

    pub fn population_history(&self) -> &[usize] {
        self.history.population()
    }

    pub fn births_history(&self) -> &[usize] {
        self.history.births()
    }

    pub fn deaths_history(&self) -> &[usize] {
        self.history.deaths()
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
