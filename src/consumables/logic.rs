//! Consumable purchase and activation transitions.

use super::types::ConsumableId;
use crate::reward::{Denial, RewardState};

/// Buy one unit of a consumable into inventory.
///
/// Same funds discipline as perk purchases: refusal leaves the caller's
/// state untouched.
pub fn purchase_consumable(
    state: &RewardState,
    item: ConsumableId,
) -> Result<RewardState, Denial> {
    let cost = item.cost();
    if state.gold < cost.gold || state.shards < cost.shards {
        return Err(Denial::InsufficientFunds);
    }

    let mut next = state.clone();
    next.gold -= cost.gold;
    next.shards -= cost.shards;
    *next.inventory.entry(item).or_insert(0) += 1;
    Ok(next)
}

/// Start a buff from owned stock.
///
/// One activation per consumable at a time; the remaining-uses counter is
/// only ever decremented by action processing, never here.
pub fn activate_consumable(
    state: &RewardState,
    item: ConsumableId,
) -> Result<RewardState, Denial> {
    if state.stock(item) == 0 {
        return Err(Denial::NoStock);
    }
    if state.buff_remaining(item) > 0 {
        return Err(Denial::AlreadyActive);
    }

    let mut next = state.clone();
    next.inventory.insert(item, state.stock(item) - 1);
    next.active_buffs.insert(item, item.duration_in_actions());
    Ok(next)
}
