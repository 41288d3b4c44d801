//! Per-year metric history

use serde::{Deserialize, Serialize};

/// Metrics for one completed tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub births: usize,
    pub deaths: usize,
    pub mean_age: f64,
    pub population: usize,
}

/// Parallel, append-only metric series, one entry per completed tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    mean_age: Vec<f64>,
    population: Vec<usize>,
    births: Vec<usize>,
    deaths: Vec<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, year: YearRecord) {
        self.births.push(year.births);
        self.deaths.push(year.deaths);
        self.mean_age.push(year.mean_age);
        self.population.push(year.population);
    }

    pub fn clear(&mut self) {
        self.mean_age.clear();
        self.population.clear();
        self.births.clear();
        self.deaths.clear();
    }

    /// Number of recorded years
    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    pub fn mean_age(&self) -> &[f64] {
        &self.mean_age
    }

    pub fn population(&self) -> &[usize] {
        &self.population
    }

    pub fn births(&self) -> &[usize] {
        &self.births
    }

    pub fn deaths(&self) -> &[usize] {
        &self.deaths
    }

    /// Record for a single year, if it exists
    pub fn year(&self, index: usize) -> Option<YearRecord> {
        Some(YearRecord {
            births: *self.births.get(index)?,
            deaths: *self.deaths.get(index)?,
            mean_age: *self.mean_age.get(index)?,
            population: *self.population.get(index)?,
        })
    }

    pub fn total_births(&self) -> usize {
        self.births.iter().sum()
    }

    pub fn total_deaths(&self) -> usize {
        self.deaths.iter().sum()
    }
}
