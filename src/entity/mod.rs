//! Entities - persons and the arena that owns them

pub mod person;
pub mod roster;

pub use person::{Marital, Person};
pub use roster::Roster;
