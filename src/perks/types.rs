//! Perk catalog: identifiers, level caps, cost curves, effect weights.

use crate::balance::{CRIT_PER_BATTLE_TEMPO_LEVEL, CRIT_PER_LUCKY_QUILL_LEVEL, GOLD_RATE_PER_MIDAS_LEVEL};
use crate::reward::Cost;
use serde::{Deserialize, Serialize};

/// Perk identifiers in the upgrade shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerkId {
    /// Luck-oriented: raises crit chance.
    LuckyQuill,
    /// Streak-oriented: smaller crit bonus, cheaper curve.
    BattleTempo,
    /// Raises the gold earned per point of experience.
    MidasInk,
}

/// What one level of a perk contributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerkEffect {
    /// Additive crit chance per level.
    CritChance(f64),
    /// Additive gold rate per level.
    GoldRate(f64),
}

impl PerkId {
    /// All perks in shop order.
    pub const ALL: [PerkId; 3] = [PerkId::LuckyQuill, PerkId::BattleTempo, PerkId::MidasInk];

    /// Display name for clients.
    pub fn name(&self) -> &'static str {
        match self {
            PerkId::LuckyQuill => "Lucky Quill",
            PerkId::BattleTempo => "Battle Tempo",
            PerkId::MidasInk => "Midas Ink",
        }
    }

    /// Flavor description for the shop detail panel.
    pub fn description(&self) -> &'static str {
        match self {
            PerkId::LuckyQuill => "A quill plucked from a fortune wyrm. Answers written with it land true more often than they should.",
            PerkId::BattleTempo => "Drills the rhythm of a long streak into your hands. Momentum finds the weak spots on its own.",
            PerkId::MidasInk => "Every stroke leaves a faint gold shimmer. Somehow, so does your purse.",
        }
    }

    /// Maximum purchasable level.
    pub fn max_level(&self) -> u8 {
        match self {
            PerkId::LuckyQuill => 10,
            PerkId::BattleTempo => 10,
            PerkId::MidasInk => 5,
        }
    }

    /// Cost to buy level `next_level` (1-based). Curves rise linearly; the
    /// shard component lags a level or two behind so early buys are gold-only.
    pub fn cost(&self, next_level: u8) -> Cost {
        let n = next_level as u64;
        match self {
            PerkId::LuckyQuill => Cost {
                gold: 60 * n,
                shards: n.saturating_sub(1),
            },
            PerkId::BattleTempo => Cost {
                gold: 40 * n,
                shards: n / 2,
            },
            PerkId::MidasInk => Cost {
                gold: 100 * n,
                shards: n,
            },
        }
    }

    /// Per-level effect weight.
    pub fn effect(&self) -> PerkEffect {
        match self {
            PerkId::LuckyQuill => PerkEffect::CritChance(CRIT_PER_LUCKY_QUILL_LEVEL),
            PerkId::BattleTempo => PerkEffect::CritChance(CRIT_PER_BATTLE_TEMPO_LEVEL),
            PerkId::MidasInk => PerkEffect::GoldRate(GOLD_RATE_PER_MIDAS_LEVEL),
        }
    }
}
