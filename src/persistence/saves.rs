//! Saving and loading reward-state records.

use super::store::{KeyValueStore, StoreError};
use crate::reward::RewardState;
use tracing::debug;

/// Store key for a user's reward state.
pub fn state_key(user: &str) -> String {
    format!("rewards.{}", user)
}

/// Serialize and store the state under the user's key.
pub fn save_reward_state(
    store: &mut impl KeyValueStore,
    user: &str,
    state: &RewardState,
) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(state)?;
    store.set(&state_key(user), &json)?;
    debug!(user, "reward state saved");
    Ok(())
}

/// Load the state for a user, `Ok(None)` when no record exists.
pub fn load_reward_state(
    store: &impl KeyValueStore,
    user: &str,
) -> Result<Option<RewardState>, StoreError> {
    match store.get(&state_key(user))? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Load the state for a user, falling back to a fresh one.
pub fn load_or_initial(
    store: &impl KeyValueStore,
    user: &str,
) -> Result<RewardState, StoreError> {
    Ok(load_reward_state(store, user)?.unwrap_or_else(RewardState::initial))
}
