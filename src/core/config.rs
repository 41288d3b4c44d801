//! Scenario configuration
//!
//! A scenario bundles everything needed for a reproducible run: the seed,
//! the initial population, how many years to simulate and the environment.
//! Scenarios are read from TOML; any key left out falls back to the
//! defaults below, which describe a mid-sized settlement over 150 years.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{PopsimError, Result};
use crate::core::types::CURVE_LEN;
use crate::simulation::environment::{DyingCurve, Environment};

/// One piece of a piecewise mortality curve
///
/// Covers ages `from..=to`. Without `end` the range is constant at
/// `start`; with `end` it ramps linearly from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalitySegment {
    pub from: usize,
    pub to: usize,
    pub start: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f32>,
}

impl MortalitySegment {
    pub fn constant(from: usize, to: usize, probability: f32) -> Self {
        Self { from, to, start: probability, end: None }
    }

    pub fn linear(from: usize, to: usize, start: f32, end: f32) -> Self {
        Self { from, to, start, end: Some(end) }
    }

    fn apply(&self, curve: DyingCurve) -> DyingCurve {
        match self.end {
            Some(end) => curve.with_linear(self.from..=self.to, self.start, end),
            None => curve.with_constant(self.from..=self.to, self.start),
        }
    }
}

/// Configuration for a full simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    // === RUN ===
    /// Seed for the population's random source
    pub seed: u64,

    /// Number of persons created by `initialize_random`
    pub initial_population: usize,

    /// Starting ages are drawn uniformly from `0..=max_start_age`
    pub max_start_age: u32,

    /// Years to advance
    pub years: u32,

    // === ENVIRONMENT ===
    pub environment: Environment,

    /// Segments painted over `environment.dying_curve`, in order
    pub mortality: Vec<MortalitySegment>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            initial_population: 8192,
            max_start_age: 60,
            years: 150,
            environment: Environment {
                resources: 12_500.0,
                // Blocks pairs sharing more than 50 of 128 bits
                incest_threshold: 50,
                polygamy: false,
                marriage_probability: 0.9,
                conceiving_probability: 0.8,
                age_of_consent: 18,
                ..Environment::default()
            },
            // Low mortality until 60, then a steep rise
            mortality: vec![
                MortalitySegment::constant(0, 4, 0.01),
                MortalitySegment::constant(5, 17, 0.002),
                MortalitySegment::constant(18, 59, 0.005),
                MortalitySegment::linear(60, 89, 0.02, 0.2),
                MortalitySegment::linear(90, 119, 0.2, 0.7),
                MortalitySegment::constant(120, 127, 0.99),
            ],
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded scenario");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ScenarioConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Environment with every mortality segment applied
    pub fn build_environment(&self) -> Environment {
        let mut env = self.environment.clone();
        env.dying_curve = self
            .mortality
            .iter()
            .fold(env.dying_curve, |curve, segment| segment.apply(curve));
        env
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        for segment in &self.mortality {
            if segment.from > segment.to || segment.to >= CURVE_LEN {
                return Err(PopsimError::InvalidEnvironment(format!(
                    "mortality segment {}..={} must lie within 0..={}",
                    segment.from,
                    segment.to,
                    CURVE_LEN - 1
                )));
            }
        }
        self.build_environment().validate()
    }
}
