//! Action processing: combo, crit, buffs, currencies, daily goal.
//!
//! `process_action` is the single entry point through which play earns
//! rewards. Time and randomness are injected so outcomes are reproducible.

use super::types::{ActionDescriptor, Reward, RewardState};
use crate::balance::*;
use crate::perks::PerkId;
use chrono::DateTime;
use rand::Rng;
use std::collections::HashMap;

/// Whether two epoch-ms timestamps fall on the same UTC calendar date.
/// Out-of-range timestamps count as a day change.
fn same_utc_day(a_ms: i64, b_ms: i64) -> bool {
    match (
        DateTime::from_timestamp_millis(a_ms),
        DateTime::from_timestamp_millis(b_ms),
    ) {
        (Some(a), Some(b)) => a.date_naive() == b.date_naive(),
        _ => false,
    }
}

/// Process one qualifying action and compute its rewards.
///
/// Total function: negative `base_xp` is clamped to 0 and the returned
/// `gold_gain` is never below 1. The input snapshot is left untouched; the
/// caller persists the returned state.
///
/// Order of effects:
/// 1. daily counters reset if the UTC date changed since the last action
/// 2. combo resets to 1 outside the 30-minute window, else increments
/// 3. crit roll at the perk-derived chance (capped)
/// 4. running buffs multiply the award, then burn one use each
/// 5. gold/shards derive from the final experience figure
/// 6. the 3rd qualifying action of the day grants the daily bonus, once
pub fn process_action(
    state: &RewardState,
    action: &ActionDescriptor,
    now_ms: i64,
    rng: &mut impl Rng,
) -> (Reward, RewardState) {
    let base_xp = action.base_xp.max(0.0);

    // Daily counters roll over lazily at midnight UTC.
    let (prev_count, prev_completed) = match state.last_action_at {
        Some(last) if !same_utc_day(last, now_ms) => (0, false),
        _ => (state.daily_action_count, state.daily_completed),
    };

    let combo = match state.last_action_at {
        Some(last) if now_ms - last <= COMBO_WINDOW_MS => state.combo.saturating_add(1),
        _ => 1,
    };
    let combo_mult = combo_multiplier(combo);

    let chance = crit_chance(
        state.perk_level(PerkId::LuckyQuill),
        state.perk_level(PerkId::BattleTempo),
    );
    let crit = rng.gen::<f64>() < chance;
    let crit_mult = if crit { CRIT_MULTIPLIER } else { 1.0 };

    // Collect multipliers from running buffs, then burn one use from each.
    let mut buff_mult = 1.0;
    let mut next_buffs = HashMap::new();
    for (&item, &remaining) in &state.active_buffs {
        if remaining == 0 {
            continue;
        }
        buff_mult *= item.effect_multiplier();
        if remaining > 1 {
            next_buffs.insert(item, remaining - 1);
        }
    }

    let xp_award = (base_xp * combo_mult * crit_mult * buff_mult).floor() as u64;
    let rate = gold_rate(state.perk_level(PerkId::MidasInk));
    let mut gold_gain = ((xp_award as f64 * rate).floor() as u64).max(1);
    let mut shard_gain = shard_drop(crit, combo);

    let daily_action_count = prev_count + 1;
    let mut daily_completed = prev_completed;
    let mut daily_completed_now = false;
    if !daily_completed && daily_action_count >= DAILY_GOAL_ACTIONS {
        daily_completed = true;
        daily_completed_now = true;
        gold_gain += DAILY_BONUS_GOLD;
        shard_gain += DAILY_BONUS_SHARDS;
    }

    let reward = Reward {
        xp_award,
        gold_gain,
        shard_gain,
        crit,
        combo_multiplier: combo_mult,
        daily_completed_now,
    };

    let mut next = state.clone();
    next.combo = combo;
    next.last_action_at = Some(now_ms);
    next.gold = next.gold.saturating_add(gold_gain);
    next.shards = next.shards.saturating_add(shard_gain);
    next.daily_action_count = daily_action_count;
    next.daily_completed = daily_completed;
    next.active_buffs = next_buffs;

    (reward, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumables::ConsumableId;
    use rand::rngs::mock::StepRng;

    // 2023-11-14 22:13:20 UTC; mid-evening, so minute-scale offsets stay
    // inside the same UTC day.
    const T0: i64 = 1_700_000_000_000;
    const MINUTE_MS: i64 = 60 * 1000;

    fn never_crit() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn always_crit() -> StepRng {
        StepRng::new(0, 0)
    }

    fn action(base_xp: f64) -> ActionDescriptor {
        ActionDescriptor { base_xp }
    }

    #[test]
    fn test_first_action_on_fresh_state() {
        let state = RewardState::initial();
        let (reward, next) = process_action(&state, &action(100.0), T0, &mut never_crit());
        assert_eq!(reward.xp_award, 100);
        assert!(!reward.crit);
        assert_eq!(reward.gold_gain, 10);
        assert_eq!(reward.combo_multiplier, 1.0);
        assert_eq!(reward.shard_gain, 0);
        assert!(!reward.daily_completed_now);
        assert_eq!(next.combo, 1);
        assert_eq!(next.last_action_at, Some(T0));
        assert_eq!(next.gold, 10);
        assert_eq!(next.daily_action_count, 1);
    }

    #[test]
    fn test_input_state_is_untouched() {
        let state = RewardState::initial();
        let _ = process_action(&state, &action(100.0), T0, &mut never_crit());
        assert_eq!(state, RewardState::initial());
    }

    #[test]
    fn test_combo_increments_within_window_and_raises_xp() {
        let state = RewardState::initial();
        let (first, next) = process_action(&state, &action(100.0), T0, &mut never_crit());
        let (second, next) =
            process_action(&next, &action(100.0), T0 + 10 * MINUTE_MS, &mut never_crit());
        assert_eq!(next.combo, 2);
        assert_eq!(second.xp_award, 110);
        assert!(second.xp_award > first.xp_award);
    }

    #[test]
    fn test_combo_survives_exactly_at_window_edge() {
        let state = RewardState::initial();
        let (_, next) = process_action(&state, &action(100.0), T0, &mut never_crit());
        let (_, next) =
            process_action(&next, &action(100.0), T0 + COMBO_WINDOW_MS, &mut never_crit());
        assert_eq!(next.combo, 2);
    }

    #[test]
    fn test_combo_resets_after_window() {
        let state = RewardState::initial();
        let (_, next) = process_action(&state, &action(100.0), T0, &mut never_crit());
        let (_, next) = process_action(&next, &action(100.0), T0 + 5 * MINUTE_MS, &mut never_crit());
        assert_eq!(next.combo, 2);
        let (reward, next) = process_action(
            &next,
            &action(100.0),
            T0 + 5 * MINUTE_MS + COMBO_WINDOW_MS + 1,
            &mut never_crit(),
        );
        assert_eq!(next.combo, 1);
        assert_eq!(reward.combo_multiplier, 1.0);
    }

    #[test]
    fn test_negative_base_xp_clamped() {
        let state = RewardState::initial();
        let (reward, _) = process_action(&state, &action(-50.0), T0, &mut never_crit());
        assert_eq!(reward.xp_award, 0);
        assert_eq!(reward.gold_gain, 1);
    }

    #[test]
    fn test_gold_gain_never_below_one() {
        let state = RewardState::initial();
        let (reward, _) = process_action(&state, &action(1.0), T0, &mut never_crit());
        assert_eq!(reward.xp_award, 1);
        assert_eq!(reward.gold_gain, 1);
    }

    #[test]
    fn test_crit_doubles_award_and_drops_shard() {
        let state = RewardState::initial();
        let (reward, next) = process_action(&state, &action(100.0), T0, &mut always_crit());
        assert!(reward.crit);
        assert_eq!(reward.xp_award, 200);
        assert_eq!(reward.shard_gain, 1);
        assert_eq!(next.shards, 1);
    }

    #[test]
    fn test_combo_milestone_drops_shard() {
        let mut state = RewardState::initial();
        state.combo = 9;
        state.last_action_at = Some(T0);
        let (reward, next) =
            process_action(&state, &action(100.0), T0 + MINUTE_MS, &mut never_crit());
        assert_eq!(next.combo, 10);
        assert_eq!(reward.shard_gain, 1);
    }

    #[test]
    fn test_active_buff_multiplies_and_burns_a_use() {
        let mut state = RewardState::initial();
        state
            .active_buffs
            .insert(ConsumableId::ScholarsBrew, 2);
        let (reward, next) = process_action(&state, &action(100.0), T0, &mut never_crit());
        assert_eq!(reward.xp_award, 150);
        assert_eq!(next.buff_remaining(ConsumableId::ScholarsBrew), 1);
    }

    #[test]
    fn test_buff_expires_after_last_use() {
        let mut state = RewardState::initial();
        state
            .active_buffs
            .insert(ConsumableId::ScholarsBrew, 1);
        let (boosted, next) = process_action(&state, &action(100.0), T0, &mut never_crit());
        assert_eq!(boosted.xp_award, 150);
        assert_eq!(next.buff_remaining(ConsumableId::ScholarsBrew), 0);

        // Next action inside the combo window: multiplier comes from combo
        // alone, the buff is gone.
        let (plain, _) = process_action(&next, &action(100.0), T0 + MINUTE_MS, &mut never_crit());
        assert_eq!(plain.xp_award, 110);
    }

    #[test]
    fn test_multiple_buffs_stack_multiplicatively() {
        let mut state = RewardState::initial();
        state.active_buffs.insert(ConsumableId::ScholarsBrew, 3);
        state.active_buffs.insert(ConsumableId::FortuneCandle, 3);
        let (reward, _) = process_action(&state, &action(100.0), T0, &mut never_crit());
        // 1.5 * 1.25 = 1.875
        assert_eq!(reward.xp_award, 187);
    }

    #[test]
    fn test_third_action_completes_daily_goal_once() {
        let state = RewardState::initial();
        let (r1, next) = process_action(&state, &action(100.0), T0, &mut never_crit());
        assert!(!r1.daily_completed_now);
        let (r2, next) =
            process_action(&next, &action(100.0), T0 + MINUTE_MS, &mut never_crit());
        assert!(!r2.daily_completed_now);
        let (r3, next) =
            process_action(&next, &action(100.0), T0 + 2 * MINUTE_MS, &mut never_crit());
        assert!(r3.daily_completed_now);
        assert!(next.daily_completed);
        assert!(r3.gold_gain > DAILY_BONUS_GOLD);
        assert!(r3.shard_gain >= DAILY_BONUS_SHARDS);

        let (r4, next) =
            process_action(&next, &action(100.0), T0 + 3 * MINUTE_MS, &mut never_crit());
        assert!(!r4.daily_completed_now);
        assert!(next.daily_completed);
        assert_eq!(next.daily_action_count, 4);
    }

    #[test]
    fn test_day_rollover_resets_daily_counters() {
        let mut state = RewardState::initial();
        state.last_action_at = Some(T0);
        state.daily_action_count = 3;
        state.daily_completed = true;

        let next_day = T0 + 24 * 60 * MINUTE_MS;
        let (reward, next) = process_action(&state, &action(100.0), next_day, &mut never_crit());
        assert!(!reward.daily_completed_now);
        assert!(!next.daily_completed);
        assert_eq!(next.daily_action_count, 1);
        // The long gap also broke the combo
        assert_eq!(next.combo, 1);
    }

    #[test]
    fn test_currencies_accumulate_across_actions() {
        let state = RewardState::initial();
        let (r1, next) = process_action(&state, &action(100.0), T0, &mut never_crit());
        let (r2, next) =
            process_action(&next, &action(100.0), T0 + MINUTE_MS, &mut never_crit());
        assert_eq!(next.gold, r1.gold_gain + r2.gold_gain);
    }

    #[test]
    fn test_midas_ink_raises_gold_gain() {
        let mut boosted = RewardState::initial();
        boosted.perks.insert(PerkId::MidasInk, 5);
        let plain = RewardState::initial();

        let (plain_reward, _) = process_action(&plain, &action(200.0), T0, &mut never_crit());
        let (rich_reward, _) = process_action(&boosted, &action(200.0), T0, &mut never_crit());
        assert!(rich_reward.gold_gain > plain_reward.gold_gain);
    }
}
