//! Zone lifecycle scenarios: transition edges, the reward gate and the
//! enforcement sweep, driven through the real tracker against the fake host.

use loot_config::FilterConfig;
use loot_core::{BlockPos, Ident, ItemRecord, LootTracker, Notice};
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

#[test]
fn test_transition_sequence_matches_presence_samples() {
    let mut world = village_world();
    let actor = world.join(OUTSIDE);
    let mut tracker = LootTracker::new(FilterConfig::defaults()).with_poll_interval(1);

    // Presence samples per poll: [false, true, true, false, true].
    let positions = [OUTSIDE, INSIDE, INSIDE, OUTSIDE, INSIDE];
    for (tick, pos) in positions.into_iter().enumerate() {
        world.move_to(actor, pos);
        tracker.on_tick(tick as u64, &mut world);
    }

    let edges: Vec<Notice> = world
        .notices_for(actor)
        .into_iter()
        .filter(|notice| matches!(notice, Notice::EnteredZone | Notice::LeftZone))
        .collect();
    assert_eq!(
        edges,
        vec![Notice::EnteredZone, Notice::LeftZone, Notice::EnteredZone]
    );
}

#[test]
fn test_reward_granted_once_per_session() {
    let mut world = village_world();
    let actor = world.join(OUTSIDE);
    let mut tracker = LootTracker::new(FilterConfig::defaults()).with_poll_interval(1);

    let positions = [OUTSIDE, INSIDE, INSIDE, OUTSIDE, INSIDE];
    let mut grant_ticks = Vec::new();
    for (tick, pos) in positions.into_iter().enumerate() {
        world.move_to(actor, pos);
        world.clear_notices();
        tracker.on_tick(tick as u64, &mut world);
        if world
            .notices_for(actor)
            .iter()
            .any(|notice| matches!(notice, Notice::RewardGranted { .. }))
        {
            grant_ticks.push(tick);
        }
    }

    assert_eq!(grant_ticks, vec![1, 4]);
}

#[test]
fn test_reward_item_is_unsafe_and_destroyed_after_leaving() {
    let mut world = village_world();
    let actor = world.join(INSIDE);
    let mut tracker = LootTracker::new(FilterConfig::defaults()).with_poll_interval(1);

    tracker.on_tick(0, &mut world);
    let granted: Vec<_> = world.inventory_of(actor).stacks().cloned().collect();
    assert_eq!(granted.len(), 1);
    assert!(granted[0].is_unsafe());
    assert_eq!(granted[0].kind(), &Ident::literal("unsafe-loots:ruby"));

    world.move_to(actor, OUTSIDE);
    tracker.on_tick(1, &mut world);
    assert_eq!(world.inventory_of(actor).stacks().count(), 0);
    assert!(
        world
            .notices_for(actor)
            .iter()
            .any(|notice| matches!(notice, Notice::ItemDestroyed { .. }))
    );
}

#[test]
fn test_sweep_destroys_exactly_the_unsafe_stacks_outside() {
    let mut world = village_world();
    let actor = world.join(OUTSIDE);
    {
        let inventory = world.inventory_of_mut(actor);
        inventory.set_at(0, unsafe_stack("minecraft:emerald", 4));
        inventory.set_at(1, ItemRecord::new(Ident::literal("minecraft:bread"), 2));
        inventory.set_at(2, unsafe_stack("minecraft:diamond", 1));
        inventory.set_at(3, ItemRecord::new(Ident::literal("minecraft:torch"), 16));
        inventory.set_at(4, unsafe_stack("minecraft:gold_ingot", 9));
    }

    let mut tracker = LootTracker::new(FilterConfig::defaults()).with_poll_interval(1);
    tracker.on_tick(0, &mut world);

    let destroyed = world
        .notices_for(actor)
        .into_iter()
        .filter(|notice| matches!(notice, Notice::ItemDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 3);

    let survivors: Vec<_> = world.inventory_of(actor).stacks().cloned().collect();
    assert_eq!(survivors.len(), 2);
    assert!(survivors.iter().all(|stack| !stack.is_unsafe()));
}

#[test]
fn test_sweep_spares_unsafe_stacks_inside() {
    let mut world = village_world();
    let actor = world.join(INSIDE);
    {
        let inventory = world.inventory_of_mut(actor);
        inventory.set_at(0, unsafe_stack("minecraft:emerald", 4));
        inventory.set_at(1, unsafe_stack("minecraft:diamond", 1));
    }

    let mut tracker = LootTracker::new(FilterConfig::defaults()).with_poll_interval(1);
    tracker.on_tick(0, &mut world);

    assert!(
        !world
            .notices_for(actor)
            .iter()
            .any(|notice| matches!(notice, Notice::ItemDestroyed { .. }))
    );
    // Both seeded stacks survive; the entry reward joins them.
    let unsafe_stacks = world
        .inventory_of(actor)
        .stacks()
        .filter(|stack| stack.is_unsafe())
        .count();
    assert_eq!(unsafe_stacks, 3);
}

#[test]
fn test_poll_cadence_gates_all_work() {
    let mut world = village_world();
    let actor = world.join(INSIDE);
    let mut tracker = LootTracker::new(FilterConfig::defaults());

    for tick in 1..20 {
        tracker.on_tick(tick, &mut world);
    }
    assert!(world.notices_for(actor).is_empty());

    tracker.on_tick(20, &mut world);
    assert_eq!(world.notices_for(actor).first(), Some(&Notice::EnteredZone));
}
