//! Reward economy data model.

use crate::consumables::ConsumableId;
use crate::perks::PerkId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete progression-economy snapshot for one player.
///
/// Transformed only by the pure functions in this crate; persisted as JSON
/// under a per-user key. Missing fields deserialize to their zero values so
/// older saves keep loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardState {
    /// Consecutive-qualifying-action streak.
    pub combo: u32,
    /// Epoch milliseconds of the last qualifying action, `None` before the first.
    pub last_action_at: Option<i64>,
    pub gold: u64,
    pub shards: u64,
    pub daily_completed: bool,
    /// Qualifying actions counted toward today's goal.
    pub daily_action_count: u32,
    /// Perk levels; absent entries are level 0.
    pub perks: HashMap<PerkId, u8>,
    /// Owned, unused consumable stock.
    pub inventory: HashMap<ConsumableId, u32>,
    /// Remaining qualifying actions per running buff; 0 or absent means inactive.
    pub active_buffs: HashMap<ConsumableId, u32>,
}

impl RewardState {
    /// Fresh account state: all counters zero, no perks, empty inventory.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Current level of a perk (0 when never purchased).
    pub fn perk_level(&self, perk: PerkId) -> u8 {
        *self.perks.get(&perk).unwrap_or(&0)
    }

    /// Owned stock of a consumable.
    pub fn stock(&self, item: ConsumableId) -> u32 {
        *self.inventory.get(&item).unwrap_or(&0)
    }

    /// Remaining qualifying actions on a buff (0 when inactive).
    pub fn buff_remaining(&self, item: ConsumableId) -> u32 {
        *self.active_buffs.get(&item).unwrap_or(&0)
    }
}

/// One qualifying player action, as reported by the caller.
#[derive(Debug, Clone, Copy)]
pub struct ActionDescriptor {
    /// Base experience for the action; negative values are clamped to 0.
    pub base_xp: f64,
}

/// Breakdown of what one action earned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reward {
    pub xp_award: u64,
    /// Always at least 1.
    pub gold_gain: u64,
    pub shard_gain: u64,
    pub crit: bool,
    pub combo_multiplier: f64,
    /// Set only on the action that completes the daily goal.
    pub daily_completed_now: bool,
}

/// Price of a purchase in both currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    pub gold: u64,
    pub shards: u64,
}

/// Why a purchase or activation was refused.
///
/// Business-rule refusals are ordinary values, never panics; callers keep
/// their original state untouched on any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Perk already at its catalog max level.
    Maxed,
    /// Not enough gold or shards for the cost.
    InsufficientFunds,
    /// No unused stock of the consumable.
    NoStock,
    /// The consumable's buff is still running.
    AlreadyActive,
}

impl Denial {
    /// Stable reason code for logs and client payloads.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Denial::Maxed => "maxed",
            Denial::InsufficientFunds => "insufficient_funds",
            Denial::NoStock => "no_stock",
            Denial::AlreadyActive => "already_active",
        }
    }
}
