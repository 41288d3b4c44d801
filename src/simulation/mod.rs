//! Yearly simulation engine
//!
//! Marriage, conception and mortality systems operate on the roster owned
//! by `Population`, which sequences them once per simulated year.

pub mod conception;
pub mod environment;
pub mod history;
pub mod matchmaking;
pub mod mortality;
pub mod output;
pub mod population;

pub use environment::{DyingCurve, Environment, PressureModel};
pub use history::{History, YearRecord};
pub use output::{SimulationOutput, SimulationStats};
pub use population::{Population, DEFAULT_MAX_START_AGE, DEFAULT_SEED};
