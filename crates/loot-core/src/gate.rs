//! One-reward-per-presence-session gate.

use tracing::debug;

use crate::host::Inventory;
use crate::item::ItemRecord;
use crate::state::ActorState;

/// Run the gate for one poll.
///
/// Inside the zone, the first poll of a presence session grants one
/// unsafe-marked copy of `reward` and latches the gate; outside, the latch
/// clears so re-entry grants again. There is no cap across sessions.
/// Returns the granted stack when one was handed out.
pub fn tick_reward(
    state: &mut ActorState,
    inventory: &mut dyn Inventory,
    reward: &ItemRecord,
) -> Option<ItemRecord> {
    if !state.in_zone {
        state.rewarded = false;
        return None;
    }
    if state.rewarded {
        return None;
    }
    state.rewarded = true;
    let granted = reward.mark_unsafe();
    debug!(item = %granted.kind(), "granting zone-entry reward");
    inventory.give_or_drop(granted.clone());
    Some(granted)
}
