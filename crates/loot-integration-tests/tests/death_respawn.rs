//! Death/respawn conservation and the disconnect lifecycle.

use loot_config::FilterConfig;
use loot_core::{BlockPos, Ident, Inventory, ItemRecord, LootTracker, Notice};
use loot_integration_tests::{Bounds, TestWorld};
use pretty_assertions::assert_eq;

const VILLAGE: &str = "minecraft:village_plains";
const INSIDE: BlockPos = BlockPos::new(50, 64, 50);
const OUTSIDE: BlockPos = BlockPos::new(-500, 64, -500);

fn village_world() -> TestWorld {
    let mut world = TestWorld::new();
    world.add_structure(
        VILLAGE,
        Bounds::new(BlockPos::new(0, 0, 0), BlockPos::new(128, 320, 128)),
        true,
    );
    world
}

fn unsafe_stack(kind: &str, count: u32) -> ItemRecord {
    ItemRecord::new(Ident::literal(kind), count).mark_unsafe()
}

/// Simulate the host dropping the whole inventory when the death finalizes.
fn host_clears_inventory(world: &mut TestWorld, actor: loot_core::ActorId) {
    let inventory = world.inventory_of_mut(actor);
    for slot in 0..inventory.slot_count() {
        inventory.remove_at(slot);
    }
}

#[test]
fn test_death_in_zone_restores_purified_items_on_respawn() {
    let mut world = village_world();
    let actor = world.join(INSIDE);
    let mut tracker = LootTracker::new(FilterConfig::defaults()).with_poll_interval(1);

    // Establish presence; discard the entry reward to keep the accounting
    // focused on the two seeded stacks.
    tracker.on_tick(0, &mut world);
    host_clears_inventory(&mut world, actor);

    {
        let inventory = world.inventory_of_mut(actor);
        inventory.set_at(0, unsafe_stack("minecraft:emerald", 4));
        inventory.set_at(1, ItemRecord::new(Ident::literal("minecraft:bread"), 2));
        inventory.set_at(2, unsafe_stack("minecraft:diamond", 1));
    }

    tracker.on_death(actor, &world);
    // Staging alone does not touch the inventory.
    assert_eq!(world.inventory_of(actor).stacks().count(), 3);
    let state = tracker.state_of(actor).unwrap();
    assert_eq!(state.retained.len(), 2);
    assert!(state.retained.iter().all(|stack| !stack.is_unsafe()));

    host_clears_inventory(&mut world, actor);
    tracker.on_respawn(actor, actor, &mut world);

    let restored: Vec<_> = world.inventory_of(actor).stacks().cloned().collect();
    assert_eq!(restored.len(), 2);
    assert!(restored.iter().all(|stack| !stack.is_unsafe()));
    let kinds: Vec<_> = restored.iter().map(|stack| stack.kind().as_str()).collect();
    assert!(kinds.contains(&"minecraft:emerald"));
    assert!(kinds.contains(&"minecraft:diamond"));
    assert!(tracker.state_of(actor).unwrap().retained.is_empty());
    assert!(
        world
            .notices_for(actor)
            .iter()
            .any(|notice| *notice == Notice::ItemsRestored { stacks: 2 })
    );
}

#[test]
fn test_death_outside_zone_stages_nothing() {
    let mut world = village_world();
    let actor = world.join(OUTSIDE);
    let mut tracker = LootTracker::new(FilterConfig::defaults()).with_poll_interval(1);
    tracker.on_tick(0, &mut world);

    world
        .inventory_of_mut(actor)
        .set_at(0, unsafe_stack("minecraft:emerald", 4));
    tracker.on_death(actor, &world);
    assert!(
        tracker
            .state_of(actor)
            .is_none_or(|state| state.retained.is_empty())
    );
}

#[test]
fn test_partial_delivery_drops_but_still_clears() {
    let mut world = village_world();
    // One-slot inventory: the second restored stack cannot fit.
    let actor = world.join_with_slots(INSIDE, 1);
    let mut tracker = LootTracker::new(FilterConfig::defaults()).with_poll_interval(1);

    tracker.on_tick(0, &mut world);
    host_clears_inventory(&mut world, actor);
    world
        .inventory_of_mut(actor)
        .set_at(0, unsafe_stack("minecraft:emerald", 4));

    tracker.on_death(actor, &world);
    // A second death before the respawn stages into the same buffer.
    host_clears_inventory(&mut world, actor);
    world
        .inventory_of_mut(actor)
        .set_at(0, unsafe_stack("minecraft:diamond", 1));
    tracker.on_death(actor, &world);
    assert_eq!(tracker.state_of(actor).unwrap().retained.len(), 2);

    host_clears_inventory(&mut world, actor);
    tracker.on_respawn(actor, actor, &mut world);

    // One given, one dropped at the feet; the buffer is empty either way.
    assert_eq!(world.inventory_of(actor).stacks().count(), 1);
    assert!(tracker.state_of(actor).unwrap().retained.is_empty());
    assert!(
        world
            .notices_for(actor)
            .iter()
            .any(|notice| *notice == Notice::ItemsRestored { stacks: 2 })
    );
}

#[test]
fn test_disconnect_purges_presence_but_keeps_buffer() {
    let mut world = village_world();
    let actor = world.join(INSIDE);
    let mut tracker = LootTracker::new(FilterConfig::defaults()).with_poll_interval(1);

    tracker.on_tick(0, &mut world);
    host_clears_inventory(&mut world, actor);
    world
        .inventory_of_mut(actor)
        .set_at(0, unsafe_stack("minecraft:emerald", 4));
    tracker.on_death(actor, &world);

    world.disconnect(actor);
    tracker.on_disconnect(actor);

    // Buffer survives the disconnect; presence flags do not.
    let state = tracker.state_of(actor).unwrap();
    assert!(!state.in_zone);
    assert!(!state.rewarded);
    assert_eq!(state.retained.len(), 1);

    world.rejoin(actor, OUTSIDE);
    host_clears_inventory(&mut world, actor);
    tracker.on_respawn(actor, actor, &mut world);
    assert_eq!(world.inventory_of(actor).stacks().count(), 1);

    tracker.on_disconnect(actor);
    assert_eq!(tracker.tracked_actors(), 0);
}

#[test]
fn test_disconnect_with_no_buffer_purges_entirely() {
    let mut world = village_world();
    let actor = world.join(INSIDE);
    let mut tracker = LootTracker::new(FilterConfig::defaults()).with_poll_interval(1);

    tracker.on_tick(0, &mut world);
    assert_eq!(tracker.tracked_actors(), 1);

    world.disconnect(actor);
    tracker.on_disconnect(actor);
    assert_eq!(tracker.tracked_actors(), 0);
}
