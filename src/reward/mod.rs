//! Reward state and the action-processing bus.
//!
//! Everything here is pure: functions take a state snapshot and return a
//! new one, so the engine can be driven from any call site without locking.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
