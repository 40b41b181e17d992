//! The per-poll enforcement sweep that destroys unsafe items outside zones.

use tracing::debug;

use crate::host::Inventory;
use crate::item::ItemRecord;

/// Remove every unsafe stack from the inventory and return the removals.
///
/// Callers gate this on presence: the tracker only sweeps actors whose
/// stored state says "not in zone". An item picked up just before leaving
/// survives until the next poll fires; the mechanic trades that bounded
/// latency for not hooking every inventory mutation.
pub fn destroy_unsafe_items(inventory: &mut dyn Inventory) -> Vec<ItemRecord> {
    let mut destroyed = Vec::new();
    for slot in 0..inventory.slot_count() {
        let is_unsafe = inventory.stack_at(slot).is_some_and(ItemRecord::is_unsafe);
        if is_unsafe {
            if let Some(stack) = inventory.remove_at(slot) {
                debug!(slot, item = %stack.kind(), count = stack.count(), "destroyed unsafe stack");
                destroyed.push(stack);
            }
        }
    }
    destroyed
}
