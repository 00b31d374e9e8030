//! Grimoire - Reward and Progression Economy Engine
//!
//! Deterministic core for the study RPG's reward loop: qualifying actions
//! earn experience, gold and shards through a combo/crit pipeline; gold and
//! shards buy permanently-leveled perks and consumable buffs; state is a
//! serializable snapshot persisted behind a key-value capability.
//!
//! Every transition is a pure function over [`reward::RewardState`]: read
//! the state, call a function, persist the returned snapshot. Time and
//! randomness are injected by the caller, so any outcome can be reproduced
//! in a test.

pub mod balance;
pub mod consumables;
pub mod perks;
pub mod persistence;
pub mod reward;

pub use consumables::{activate_consumable, purchase_consumable, ConsumableId};
pub use perks::{purchase_perk, PerkId};
pub use persistence::{
    load_reward_state, migrate_study_game_loop, save_reward_state, FileStore, KeyValueStore,
    MemoryStore, StoreError,
};
pub use reward::{process_action, ActionDescriptor, Denial, Reward, RewardState};
