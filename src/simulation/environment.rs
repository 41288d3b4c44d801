//! Environment - per-tick configuration of the simulation
//!
//! The environment is a plain value. Callers replace it wholesale between
//! ticks; the engine only reads it. Out-of-range values are clamped where
//! they are used, `validate` exists for callers that want to reject them.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::error::{PopsimError, Result};
use crate::core::types::{CURVE_LEN, GENOME_BITS};

/// Per-age yearly death probability, one entry per year of age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct DyingCurve([f32; CURVE_LEN]);

impl DyingCurve {
    /// Same probability at every age
    pub fn uniform(probability: f32) -> Self {
        Self([probability; CURVE_LEN])
    }

    /// Overwrite an inclusive age range with a constant
    pub fn with_constant(mut self, ages: RangeInclusive<usize>, probability: f32) -> Self {
        for age in clip(ages) {
            self.0[age] = probability;
        }
        self
    }

    /// Overwrite an inclusive age range with a ramp from `start` to `end`,
    /// both endpoints included
    pub fn with_linear(mut self, ages: RangeInclusive<usize>, start: f32, end: f32) -> Self {
        let ages = clip(ages);
        let first = *ages.start();
        let steps = ages.end().saturating_sub(first);
        for age in ages {
            let t = if steps == 0 {
                0.0
            } else {
                (age - first) as f32 / steps as f32
            };
            self.0[age] = start + (end - start) * t;
        }
        self
    }

    /// Death probability for an age, clamped to [0, 1].
    /// Ages past the curve reuse the last entry.
    pub fn probability_at(&self, age: u32) -> f64 {
        let idx = (age as usize).min(CURVE_LEN - 1);
        (self.0[idx] as f64).clamp(0.0, 1.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

fn clip(ages: RangeInclusive<usize>) -> RangeInclusive<usize> {
    let end = (*ages.end()).min(CURVE_LEN - 1);
    *ages.start()..=end
}

impl Default for DyingCurve {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}

impl TryFrom<Vec<f32>> for DyingCurve {
    type Error = PopsimError;

    fn try_from(values: Vec<f32>) -> Result<Self> {
        let actual = values.len();
        let array: [f32; CURVE_LEN] = values.try_into().map_err(|_| PopsimError::InvalidCurveLength {
            expected: CURVE_LEN,
            actual,
        })?;
        Ok(Self(array))
    }
}

impl From<DyingCurve> for Vec<f32> {
    fn from(curve: DyingCurve) -> Self {
        curve.0.to_vec()
    }
}

/// How population pressure is derived from size and resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureModel {
    /// `1 - population / resources`: crowding damps mating
    PopulationRatio,
    /// `1 - resources / population`: the inverted ratio historically used
    /// for polygamous conception
    #[default]
    ResourceRatio,
}

impl PressureModel {
    /// Damping factor in [0, 1]. An empty population always yields 1.0.
    pub fn pressure(&self, population: usize, resources: f64) -> f64 {
        if population == 0 {
            return 1.0;
        }
        let n = population as f64;
        let ratio = match self {
            PressureModel::PopulationRatio => n / resources,
            PressureModel::ResourceRatio => resources / n,
        };
        (1.0 - ratio).clamp(0.0, 1.0)
    }
}

/// Environmental parameters read by every phase of a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Soft carrying capacity
    pub resources: f64,
    /// Maximum allowed equal bits between mates
    pub incest_threshold: u32,
    pub dying_curve: DyingCurve,
    /// Random-father conception instead of marriage
    pub polygamy: bool,
    pub marriage_probability: f64,
    pub conceiving_probability: f64,
    pub age_of_consent: u32,
    /// Distinct bits flipped in every newborn
    pub mutation_bits: u32,
    pub female_fertility_min: u32,
    pub female_fertility_max: u32,
    pub male_fertility_min: u32,
    pub male_fertility_max: u32,
    /// Pressure formula for polygamous conception
    pub polygamy_pressure: PressureModel,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            resources: 0.0,
            incest_threshold: 64,
            dying_curve: DyingCurve::default(),
            polygamy: false,
            marriage_probability: 0.0,
            conceiving_probability: 0.0,
            age_of_consent: 18,
            mutation_bits: 0,
            female_fertility_min: 16,
            female_fertility_max: 45,
            male_fertility_min: 16,
            male_fertility_max: 60,
            polygamy_pressure: PressureModel::ResourceRatio,
        }
    }
}

impl Environment {
    /// Pressure used by marriage and monogamous conception
    pub fn crowding_pressure(&self, population: usize) -> f64 {
        PressureModel::PopulationRatio.pressure(population, self.resources)
    }

    /// Pressure used by polygamous conception
    pub fn polygamy_pressure(&self, population: usize) -> f64 {
        self.polygamy_pressure.pressure(population, self.resources)
    }

    pub fn female_fertile(&self, age: u32) -> bool {
        age >= self.female_fertility_min && age <= self.female_fertility_max
    }

    pub fn male_fertile(&self, age: u32) -> bool {
        age >= self.male_fertility_min && age <= self.male_fertility_max
    }

    /// Check the documented sane ranges
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(PopsimError::InvalidEnvironment(msg));

        if !(self.resources > 0.0) || !self.resources.is_finite() {
            return invalid(format!("resources must be positive, got {}", self.resources));
        }
        for (name, p) in [
            ("marriage_probability", self.marriage_probability),
            ("conceiving_probability", self.conceiving_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{} must be in [0, 1], got {}", name, p));
            }
        }
        if self.incest_threshold > GENOME_BITS {
            return invalid(format!(
                "incest_threshold ({}) exceeds genome width {}",
                self.incest_threshold, GENOME_BITS
            ));
        }
        if self.mutation_bits > GENOME_BITS {
            return invalid(format!(
                "mutation_bits ({}) exceeds genome width {}",
                self.mutation_bits, GENOME_BITS
            ));
        }
        if self.female_fertility_min > self.female_fertility_max {
            return invalid(format!(
                "female fertility window is empty ({}..={})",
                self.female_fertility_min, self.female_fertility_max
            ));
        }
        if self.male_fertility_min > self.male_fertility_max {
            return invalid(format!(
                "male fertility window is empty ({}..={})",
                self.male_fertility_min, self.male_fertility_max
            ));
        }
        if let Some(age) = self.dying_curve.as_slice().iter().position(|p| !p.is_finite()) {
            return invalid(format!("dying_curve[{}] is not finite", age));
        }
        Ok(())
    }
}
