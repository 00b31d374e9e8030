//! Stock-limited consumable buffs.
//!
//! A consumable is bought into inventory, then activated to run for a fixed
//! number of future qualifying actions (not wall-clock time).

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
