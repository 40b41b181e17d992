//! Death/respawn held-over buffer.
//!
//! Dying inside a zone normally means the host drops or destroys the
//! inventory. The buffer intercepts nothing: at death it only stages
//! purified copies of the unsafe stacks in the actor's state record, and at
//! respawn it hands every staged stack back (or drops it at the actor's
//! feet), then clears itself exactly once.

use tracing::debug;

use crate::host::{Delivery, Inventory};
use crate::item::ItemRecord;
use crate::state::ActorState;

/// Stage purified copies of the actor's unsafe stacks for the next respawn.
///
/// Only acts when the stored presence says the death happened in a zone.
/// The inventory itself is not modified; the death proceeds however the host
/// decides. Returns the number of staged stacks.
pub fn stage_on_death(state: &mut ActorState, inventory: &dyn Inventory) -> usize {
    if !state.in_zone {
        return 0;
    }
    let before = state.retained.len();
    for slot in 0..inventory.slot_count() {
        if let Some(stack) = inventory.stack_at(slot) {
            if stack.is_unsafe() {
                debug!(slot, item = %stack.kind(), "staging purified copy for respawn");
                state.retained.push(stack.purify());
            }
        }
    }
    state.retained.len() - before
}

/// Hand every staged stack back to the actor and clear the buffer.
///
/// The buffer is taken up front, so it ends empty unconditionally; a stack
/// the inventory cannot hold is dropped at the actor's feet by the host
/// primitive, and one delivery never blocks the rest. Returns each restored
/// stack with how it was delivered.
pub fn restore_on_respawn(
    state: &mut ActorState,
    inventory: &mut dyn Inventory,
) -> Vec<(ItemRecord, Delivery)> {
    let staged = std::mem::take(&mut state.retained);
    staged
        .into_iter()
        .map(|stack| {
            let delivery = inventory.give_or_drop(stack.clone());
            (stack, delivery)
        })
        .collect()
}
