pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::{MortalitySegment, ScenarioConfig};
pub use error::{PopsimError, Result};
pub use rng::RandomSource;
