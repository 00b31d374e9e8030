//! Perk purchase transition.

use super::types::PerkId;
use crate::reward::{Denial, RewardState};

/// Whether the next level of a perk is affordable right now.
pub fn can_afford_perk(state: &RewardState, perk: PerkId) -> bool {
    let level = state.perk_level(perk);
    if level >= perk.max_level() {
        return false;
    }
    let cost = perk.cost(level + 1);
    state.gold >= cost.gold && state.shards >= cost.shards
}

/// Buy the next level of a perk.
///
/// Checks the level cap before funds, so a maxed perk reports `Maxed` even
/// for a broke player. On success both currencies are deducted and the level
/// rises by one; on refusal the caller's state is untouched.
pub fn purchase_perk(state: &RewardState, perk: PerkId) -> Result<RewardState, Denial> {
    let level = state.perk_level(perk);
    if level >= perk.max_level() {
        return Err(Denial::Maxed);
    }
    let cost = perk.cost(level + 1);
    if state.gold < cost.gold || state.shards < cost.shards {
        return Err(Denial::InsufficientFunds);
    }

    let mut next = state.clone();
    next.gold -= cost.gold;
    next.shards -= cost.shards;
    next.perks.insert(perk, level + 1);
    Ok(next)
}
