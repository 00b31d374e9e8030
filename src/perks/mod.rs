//! Permanently leveled perks bought with gold and shards.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
