//! In-process fake host for exercising the tracker end to end.
//!
//! [`TestWorld`] implements [`HostWorld`] over plain collections: a
//! structure registry of axis-aligned boxes, a roster of actors with
//! positions and slot inventories, and a notice log. Scenarios in `tests/`
//! drive a real [`loot_core::LootTracker`] against it the same way a server
//! adapter would.
//!
//! # Example
//!
//! ```ignore
//! let mut world = TestWorld::new();
//! world.add_structure("minecraft:village_plains", village_box(), true);
//! let actor = world.join(BlockPos::new(100, 64, 100));
//!
//! let mut tracker = LootTracker::new(FilterConfig::defaults());
//! tracker.on_tick(20, &mut world);
//! assert_eq!(world.notices_for(actor), vec![Notice::EnteredZone]);
//! ```

use hashbrown::HashMap;

use loot_core::host::{Placement, StructureError, StructureIndex};
use loot_core::{ActorId, BlockPos, HostWorld, Ident, Inventory, Notice, SlotInventory};

/// Install the test log subscriber, honoring `RUST_LOG`. Safe to call from
/// every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Inclusive axis-aligned box in block coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: BlockPos, max: BlockPos) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, pos: BlockPos) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x)
            && (self.min.y..=self.max.y).contains(&pos.y)
            && (self.min.z..=self.max.z).contains(&pos.z)
    }
}

#[derive(Debug, Clone)]
struct StructureInstance {
    bounds: Bounds,
    /// False models a started-but-empty instance (no generated pieces).
    fully_generated: bool,
}

/// Fake structure registry: kinds mapped to placed instances.
#[derive(Debug, Default)]
pub struct TestStructures {
    instances: Vec<(Ident, StructureInstance)>,
    registered: Vec<Ident>,
}

impl TestStructures {
    /// Register a kind without placing any instance of it.
    pub fn register(&mut self, kind: Ident) {
        if !self.registered.contains(&kind) {
            self.registered.push(kind);
        }
    }

    /// Place an instance of `kind` covering `bounds`.
    pub fn place(&mut self, kind: Ident, bounds: Bounds, fully_generated: bool) {
        self.register(kind.clone());
        self.instances.push((
            kind,
            StructureInstance {
                bounds,
                fully_generated,
            },
        ));
    }
}

impl StructureIndex for TestStructures {
    fn kinds(&self) -> Vec<Ident> {
        self.registered.clone()
    }

    fn placement_at(&self, kind: &Ident, pos: BlockPos) -> Result<Placement, StructureError> {
        if !self.registered.contains(kind) {
            return Err(StructureError::UnknownKind(kind.clone()));
        }
        let mut placement = Placement::Absent;
        for (k, instance) in &self.instances {
            if k == kind && instance.bounds.contains(pos) {
                if instance.fully_generated {
                    return Ok(Placement::Generated);
                }
                placement = Placement::Placeholder;
            }
        }
        Ok(placement)
    }
}

#[derive(Debug)]
struct TestActor {
    pos: BlockPos,
    inventory: SlotInventory,
    connected: bool,
}

/// The fake server world.
#[derive(Debug, Default)]
pub struct TestWorld {
    structures: TestStructures,
    actors: HashMap<ActorId, TestActor>,
    roster: Vec<ActorId>,
    notices: Vec<(ActorId, Notice)>,
}

/// Default inventory size for joined actors (main inventory + hotbar).
pub const DEFAULT_SLOTS: usize = 36;

impl TestWorld {
    #[must_use]
    pub fn new() -> Self {
        init_tracing();
        Self::default()
    }

    /// Register and place a fully generated (or placeholder) structure.
    pub fn add_structure(&mut self, kind: &str, bounds: Bounds, fully_generated: bool) {
        self.structures
            .place(Ident::literal(kind), bounds, fully_generated);
    }

    /// Register a kind with no placed instances.
    pub fn register_structure(&mut self, kind: &str) {
        self.structures.register(Ident::literal(kind));
    }

    /// Connect a new actor at `pos` with [`DEFAULT_SLOTS`] empty slots.
    pub fn join(&mut self, pos: BlockPos) -> ActorId {
        self.join_with_slots(pos, DEFAULT_SLOTS)
    }

    /// Connect a new actor with a specific inventory size.
    pub fn join_with_slots(&mut self, pos: BlockPos, slots: usize) -> ActorId {
        let actor = ActorId::random();
        self.actors.insert(
            actor,
            TestActor {
                pos,
                inventory: SlotInventory::with_slots(slots),
                connected: true,
            },
        );
        self.roster.push(actor);
        actor
    }

    /// Disconnect an actor. Its inventory persists for a later rejoin.
    pub fn disconnect(&mut self, actor: ActorId) {
        if let Some(entry) = self.actors.get_mut(&actor) {
            entry.connected = false;
        }
        self.roster.retain(|id| *id != actor);
    }

    /// Reconnect a previously disconnected actor at `pos`.
    pub fn rejoin(&mut self, actor: ActorId, pos: BlockPos) {
        if let Some(entry) = self.actors.get_mut(&actor) {
            entry.connected = true;
            entry.pos = pos;
            self.roster.push(actor);
        }
    }

    /// Teleport an actor.
    pub fn move_to(&mut self, actor: ActorId, pos: BlockPos) {
        if let Some(entry) = self.actors.get_mut(&actor) {
            entry.pos = pos;
        }
    }

    /// Direct access to an actor's inventory.
    ///
    /// # Panics
    /// Panics if the actor was never joined.
    #[must_use]
    pub fn inventory_of(&self, actor: ActorId) -> &SlotInventory {
        &self.actors[&actor].inventory
    }

    /// Mutable access to an actor's inventory, for seeding scenarios.
    ///
    /// # Panics
    /// Panics if the actor was never joined.
    pub fn inventory_of_mut(&mut self, actor: ActorId) -> &mut SlotInventory {
        &mut self
            .actors
            .get_mut(&actor)
            .expect("actor never joined")
            .inventory
    }

    /// Notices delivered to `actor`, in order.
    #[must_use]
    pub fn notices_for(&self, actor: ActorId) -> Vec<Notice> {
        self.notices
            .iter()
            .filter(|(id, _)| *id == actor)
            .map(|(_, notice)| notice.clone())
            .collect()
    }

    /// Forget all delivered notices.
    pub fn clear_notices(&mut self) {
        self.notices.clear();
    }
}

impl HostWorld for TestWorld {
    fn structures(&self) -> &dyn StructureIndex {
        &self.structures
    }

    fn connected_actors(&self) -> Vec<ActorId> {
        self.roster.clone()
    }

    fn position_of(&self, actor: ActorId) -> Option<BlockPos> {
        self.actors
            .get(&actor)
            .filter(|entry| entry.connected)
            .map(|entry| entry.pos)
    }

    fn inventory(&self, actor: ActorId) -> Option<&dyn Inventory> {
        self.actors
            .get(&actor)
            .map(|entry| &entry.inventory as &dyn Inventory)
    }

    fn inventory_mut(&mut self, actor: ActorId) -> Option<&mut dyn Inventory> {
        self.actors
            .get_mut(&actor)
            .map(|entry| &mut entry.inventory as &mut dyn Inventory)
    }

    fn notify(&mut self, actor: ActorId, notice: &Notice) {
        self.notices.push((actor, notice.clone()));
    }
}
