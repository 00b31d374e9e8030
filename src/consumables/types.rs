//! Consumable catalog: costs, durations, effect multipliers.

use crate::reward::Cost;
use serde::{Deserialize, Serialize};

/// Consumable identifiers in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumableId {
    ScholarsBrew,
    FortuneCandle,
    CrimsonElixir,
}

impl ConsumableId {
    /// All consumables in shop order.
    pub const ALL: [ConsumableId; 3] = [
        ConsumableId::ScholarsBrew,
        ConsumableId::FortuneCandle,
        ConsumableId::CrimsonElixir,
    ];

    /// Display name for clients.
    pub fn name(&self) -> &'static str {
        match self {
            ConsumableId::ScholarsBrew => "Scholar's Brew",
            ConsumableId::FortuneCandle => "Fortune Candle",
            ConsumableId::CrimsonElixir => "Crimson Elixir",
        }
    }

    /// Flavor description for the shop detail panel.
    pub fn description(&self) -> &'static str {
        match self {
            ConsumableId::ScholarsBrew => "Bitter, hot, and thick as tar. The next few exercises go down easier than the drink did.",
            ConsumableId::FortuneCandle => "Burns with a steady green flame. Slow, but it keeps paying out as long as it lasts.",
            ConsumableId::CrimsonElixir => "Double rewards in a glass vial. Wears off quickly, and the shakes are real.",
        }
    }

    /// Purchase price.
    pub fn cost(&self) -> Cost {
        match self {
            ConsumableId::ScholarsBrew => Cost { gold: 40, shards: 0 },
            ConsumableId::FortuneCandle => Cost { gold: 60, shards: 1 },
            ConsumableId::CrimsonElixir => Cost { gold: 100, shards: 2 },
        }
    }

    /// How many qualifying actions one activation lasts.
    pub fn duration_in_actions(&self) -> u32 {
        match self {
            ConsumableId::ScholarsBrew => 5,
            ConsumableId::FortuneCandle => 10,
            ConsumableId::CrimsonElixir => 3,
        }
    }

    /// Experience multiplier while the buff runs.
    pub fn effect_multiplier(&self) -> f64 {
        match self {
            ConsumableId::ScholarsBrew => 1.5,
            ConsumableId::FortuneCandle => 1.25,
            ConsumableId::CrimsonElixir => 2.0,
        }
    }
}
