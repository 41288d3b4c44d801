//! Simulation output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::entity::Person;
use crate::simulation::environment::Environment;
use crate::simulation::history::History;
use crate::simulation::population::Population;

/// Complete run output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub environment: Environment,
    pub persons: Vec<Person>,
    pub history: History,
    pub statistics: SimulationStats,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationStats {
    pub seed: u64,
    pub years_simulated: usize,
    pub simulation_time_ms: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub total_births: usize,
    pub total_deaths: usize,
    pub married: usize,
    pub final_mean_age: f64,
}

impl SimulationOutput {
    pub fn new(population: &Population, seed: u64, initial_population: usize, elapsed: Duration) -> Self {
        let history = population.history().clone();
        let final_mean_age = history.mean_age().last().copied().unwrap_or(0.0);

        Self {
            environment: population.get_environment(),
            persons: population.persons().to_vec(),
            statistics: SimulationStats {
                seed,
                years_simulated: history.len(),
                simulation_time_ms: elapsed.as_millis() as u64,
                initial_population,
                final_population: population.len(),
                total_births: history.total_births(),
                total_deaths: history.total_deaths(),
                married: population.married_count(),
                final_mean_age,
            },
            history,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn summary(&self) -> String {
        let s = &self.statistics;
        format!(
            "Simulated {} years in {}ms (seed {})\n\
             Population {} -> {}, {} births, {} deaths\n\
             {} married, mean age {:.1}",
            s.years_simulated,
            s.simulation_time_ms,
            s.seed,
            s.initial_population,
            s.final_population,
            s.total_births,
            s.total_deaths,
            s.married,
            s.final_mean_age,
        )
    }
}
