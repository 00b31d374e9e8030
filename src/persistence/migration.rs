//! One-shot merge of the retired study-game-loop save format.
//!
//! The old client persisted a small record per user. On first contact we
//! fold it into the current reward state and delete the old key; the
//! presence of that key is the only "has this run" marker needed, so the
//! operation is naturally idempotent.

use super::saves::{load_or_initial, save_reward_state};
use super::store::{KeyValueStore, StoreError};
use serde::Deserialize;
use tracing::info;

/// Store key of the retired format for a user.
pub fn legacy_key(user: &str) -> String {
    format!("studyGameLoop.{}", user)
}

/// Snapshot shape of the retired save format.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyStudyLoop {
    pub version: u32,
    pub gold: u64,
    pub shards: u64,
    pub combo: u32,
}

/// Merge a user's legacy record into their current state, if one exists.
///
/// Currencies are added, the combo keeps the larger streak, everything else
/// stays as-is. Returns `Ok(true)` when a record was merged; `Ok(false)`
/// means there was nothing to do. The legacy key is deleted only after the
/// merged state is saved.
pub fn migrate_study_game_loop(
    store: &mut impl KeyValueStore,
    user: &str,
) -> Result<bool, StoreError> {
    let key = legacy_key(user);
    let Some(raw) = store.get(&key)? else {
        return Ok(false);
    };
    let legacy: LegacyStudyLoop = serde_json::from_str(&raw)?;

    let mut merged = load_or_initial(store, user)?;
    merged.gold = merged.gold.saturating_add(legacy.gold);
    merged.shards = merged.shards.saturating_add(legacy.shards);
    merged.combo = merged.combo.max(legacy.combo);

    save_reward_state(store, user, &merged)?;
    store.delete(&key)?;
    info!(
        user,
        gold = legacy.gold,
        shards = legacy.shards,
        "legacy study-game-loop record merged"
    );
    Ok(true)
}
