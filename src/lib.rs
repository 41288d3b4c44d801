//! Popsim - discrete-time demographic and genetic population simulation

pub mod core;
pub mod entity;
pub mod genetics;
pub mod simulation;

pub use crate::core::error::{PopsimError, Result};
pub use crate::core::types::{Gender, PersonId};
pub use crate::entity::{Marital, Person};
pub use crate::genetics::{Genome, IncestGuard};
pub use crate::simulation::{DyingCurve, Environment, Population, PressureModel};
