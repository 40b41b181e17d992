//! The tracker that ties presence, rewards, enforcement and the death
//! buffer to the host's callbacks.
//!
//! One [`LootTracker`] instance lives for the whole server session. The host
//! adapter forwards four callbacks, all on the single server tick thread:
//!
//! - every tick → [`LootTracker::on_tick`] (the tracker itself decides when
//!   a poll fires),
//! - player death → [`LootTracker::on_death`] (observational; the death is
//!   never vetoed),
//! - player respawn → [`LootTracker::on_respawn`],
//! - player disconnect → [`LootTracker::on_disconnect`].

use tracing::{debug, info, warn};

use crate::buffer;
use crate::gate;
use crate::host::{Delivery, HostWorld};
use crate::ident::Ident;
use crate::item::ItemRecord;
use crate::notice::Notice;
use crate::presence::{self, StructureFilter, Transition};
use crate::state::{ActorId, ActorState, MemoryStore, StateStorage};
use crate::sweep;

/// Default poll cadence in ticks (one second of game time).
pub const DEFAULT_POLL_INTERVAL: u64 = 20;

/// Item kind granted on first zone entry, from the original mod's item set.
pub const DEFAULT_REWARD_ITEM: &str = "unsafe-loots:ruby";

fn default_reward() -> ItemRecord {
    ItemRecord::new(Ident::literal(DEFAULT_REWARD_ITEM), 1)
}

/// Tick-driven hardcore-loot tracker.
///
/// Generic over the state backend `S` and the zone filter `F` so tests run
/// against in-memory parts and the production adapter plugs in the loaded
/// config.
pub struct LootTracker<S, F> {
    store: S,
    filter: F,
    poll_interval: u64,
    reward: ItemRecord,
}

impl<F: StructureFilter> LootTracker<MemoryStore, F> {
    /// Tracker over a fresh in-memory store.
    #[must_use]
    pub fn new(filter: F) -> Self {
        Self::with_store(MemoryStore::new(), filter)
    }
}

impl<S: StateStorage, F: StructureFilter> LootTracker<S, F> {
    /// Tracker over an injected state backend.
    #[must_use]
    pub fn with_store(store: S, filter: F) -> Self {
        Self {
            store,
            filter,
            poll_interval: DEFAULT_POLL_INTERVAL,
            reward: default_reward(),
        }
    }

    /// Override the poll cadence. Clamped to at least one tick.
    #[must_use]
    pub fn with_poll_interval(mut self, ticks: u64) -> Self {
        self.poll_interval = ticks.max(1);
        self
    }

    /// Override the zone-entry reward stack.
    #[must_use]
    pub fn with_reward(mut self, reward: ItemRecord) -> Self {
        self.reward = reward;
        self
    }

    /// The stored state for an actor, if any.
    #[must_use]
    pub fn state_of(&self, actor: ActorId) -> Option<&ActorState> {
        self.store.get(actor)
    }

    /// Number of actors with tracked state.
    #[must_use]
    pub fn tracked_actors(&self) -> usize {
        self.store.len()
    }

    /// Host tick callback. Polls every connected actor when
    /// `tick % poll_interval == 0`, otherwise does nothing.
    pub fn on_tick(&mut self, tick: u64, world: &mut dyn HostWorld) {
        if tick % self.poll_interval != 0 {
            return;
        }
        for actor in world.connected_actors() {
            self.poll_actor(actor, world);
        }
    }

    /// One actor's poll: presence sample → transition → reward gate →
    /// enforcement sweep, then notices.
    fn poll_actor(&mut self, actor: ActorId, world: &mut dyn HostWorld) {
        let Some(pos) = world.position_of(actor) else {
            return;
        };
        let in_zone = presence::is_in_zone(&self.filter, world.structures(), pos);

        let mut notices = Vec::new();
        let state = self.store.entry(actor);
        match presence::check_transition(state, in_zone) {
            Transition::Entered => {
                info!(%actor, "entered unsafe zone");
                notices.push(Notice::EnteredZone);
            }
            Transition::Left => {
                info!(%actor, "left unsafe zone");
                notices.push(Notice::LeftZone);
            }
            Transition::Unchanged => {}
        }

        if let Some(inventory) = world.inventory_mut(actor) {
            if let Some(granted) = gate::tick_reward(state, inventory, &self.reward) {
                notices.push(Notice::RewardGranted {
                    name: granted.display_name(),
                });
            }
            if !in_zone {
                for stack in sweep::destroy_unsafe_items(inventory) {
                    info!(%actor, item = %stack.kind(), count = stack.count(), "destroyed unsafe item outside zone");
                    notices.push(Notice::ItemDestroyed {
                        name: stack.display_name(),
                        count: stack.count(),
                    });
                }
            }
        }

        for notice in &notices {
            world.notify(actor, notice);
        }
    }

    /// Host death callback. Stages purified copies of the actor's unsafe
    /// stacks when the death happened in a zone. Purely observational; the
    /// core never cancels a death.
    pub fn on_death(&mut self, actor: ActorId, world: &dyn HostWorld) {
        let Some(inventory) = world.inventory(actor) else {
            warn!(%actor, "death hook fired for actor without an inventory");
            return;
        };
        let state = self.store.entry(actor);
        let staged = buffer::stage_on_death(state, inventory);
        if staged > 0 {
            info!(%actor, staged, "staged purified stacks for next respawn");
        }
    }

    /// Host respawn callback. Flushes the retained buffer of the prior
    /// identity into the respawned actor's inventory, dropping what does not
    /// fit, then clears the buffer.
    pub fn on_respawn(&mut self, old: ActorId, new: ActorId, world: &mut dyn HostWorld) {
        if old != new {
            let moved = std::mem::take(&mut self.store.entry(old).retained);
            if self.store.get(old).is_some_and(ActorState::is_default) {
                self.store.remove(old);
            }
            self.store.entry(new).retained.extend(moved);
        }

        let state = self.store.entry(new);
        if state.retained.is_empty() {
            return;
        }
        let Some(inventory) = world.inventory_mut(new) else {
            warn!(actor = %new, "respawn hook fired before inventory was available, keeping buffer");
            return;
        };
        let restored = buffer::restore_on_respawn(state, inventory);
        let given = restored
            .iter()
            .filter(|(_, delivery)| *delivery == Delivery::Given)
            .count();
        info!(
            actor = %new,
            given,
            dropped = restored.len() - given,
            "returned retained stacks after respawn"
        );
        world.notify(
            new,
            &Notice::ItemsRestored {
                stacks: restored.len(),
            },
        );
    }

    /// Host disconnect callback. Presence and reward flags are purged so the
    /// state map stays bounded by the connected-player count; a non-empty
    /// retained buffer survives, so death → quit → rejoin still restores.
    pub fn on_disconnect(&mut self, actor: ActorId) {
        let Some(state) = self.store.get(actor) else {
            return;
        };
        if state.retained.is_empty() {
            self.store.remove(actor);
            debug!(%actor, "purged tracking state on disconnect");
        } else {
            let state = self.store.entry(actor);
            state.in_zone = false;
            state.rewarded = false;
            debug!(%actor, retained = state.retained.len(), "kept retained buffer across disconnect");
        }
    }
}
