//! The surface a host adapter must provide.
//!
//! The core never registers against an event bus or touches engine types. A
//! thin adapter in the real server implements these traits over its own
//! structure registry, player list and inventory storage, and forwards tick,
//! death, respawn and disconnect callbacks to [`LootTracker`].
//!
//! [`LootTracker`]: crate::tracker::LootTracker

use thiserror::Error;

use crate::ident::Ident;
use crate::item::ItemRecord;
use crate::notice::Notice;
use crate::state::ActorId;

/// A block position in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// What the structure registry knows about a kind at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// No instance of the kind overlaps the position.
    Absent,
    /// An instance overlaps the position but has no generated pieces yet.
    Placeholder,
    /// A fully generated instance overlaps the position.
    Generated,
}

/// Error from a structure registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// The registry does not know the kind at all.
    #[error("unknown structure kind: {0}")]
    UnknownKind(Ident),
}

/// Read access to the host's structure registry.
pub trait StructureIndex {
    /// Every structure kind the registry knows.
    fn kinds(&self) -> Vec<Ident>;

    /// Whether an instance of `kind` overlaps `pos`, and how complete it is.
    fn placement_at(&self, kind: &Ident, pos: BlockPos) -> Result<Placement, StructureError>;
}

/// Outcome of a give-or-drop delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The stack went into an inventory slot.
    Given,
    /// The inventory was full; the stack was dropped at the actor's feet.
    Dropped,
}

/// The slice of the host's inventory surface the core consumes.
///
/// Slots hold at most one stack; `None` means the slot is empty. The core
/// never redefines storage, it only reads, removes and delivers stacks.
pub trait Inventory {
    /// Number of slots.
    fn slot_count(&self) -> usize;

    /// The stack in `slot`, if any.
    fn stack_at(&self, slot: usize) -> Option<&ItemRecord>;

    /// Remove and return the stack in `slot`.
    fn remove_at(&mut self, slot: usize) -> Option<ItemRecord>;

    /// Give the stack to the owner, dropping it at their feet when the
    /// inventory is full. Never fails.
    fn give_or_drop(&mut self, item: ItemRecord) -> Delivery;
}

/// A plain slot-array [`Inventory`], one optional stack per slot.
///
/// Not a reimplementation of host storage; it backs unit tests and the
/// integration harness, and small adapters can mirror host inventories into
/// it.
#[derive(Debug, Clone, Default)]
pub struct SlotInventory {
    slots: Vec<Option<ItemRecord>>,
}

impl SlotInventory {
    /// Create an inventory with `slots` empty slots.
    #[must_use]
    pub fn with_slots(slots: usize) -> Self {
        Self {
            slots: vec![None; slots],
        }
    }

    /// Put a stack into `slot`, returning whatever was there.
    pub fn set_at(&mut self, slot: usize, stack: ItemRecord) -> Option<ItemRecord> {
        self.slots.get_mut(slot).and_then(|s| s.replace(stack))
    }

    /// Iterate the non-empty stacks.
    pub fn stacks(&self) -> impl Iterator<Item = &ItemRecord> {
        self.slots.iter().flatten()
    }
}

impl Inventory for SlotInventory {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn stack_at(&self, slot: usize) -> Option<&ItemRecord> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn remove_at(&mut self, slot: usize) -> Option<ItemRecord> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    fn give_or_drop(&mut self, item: ItemRecord) -> Delivery {
        if let Some(empty) = self.slots.iter_mut().find(|slot| slot.is_none()) {
            *empty = Some(item);
            Delivery::Given
        } else {
            Delivery::Dropped
        }
    }
}

/// Everything the tracker needs from the running server.
pub trait HostWorld {
    /// The world's structure registry.
    fn structures(&self) -> &dyn StructureIndex;

    /// Actors connected right now. No ordering guarantee.
    fn connected_actors(&self) -> Vec<ActorId>;

    /// An actor's current block position, `None` if it is gone.
    fn position_of(&self, actor: ActorId) -> Option<BlockPos>;

    /// Read access to an actor's inventory.
    fn inventory(&self, actor: ActorId) -> Option<&dyn Inventory>;

    /// Write access to an actor's inventory.
    fn inventory_mut(&mut self, actor: ActorId) -> Option<&mut dyn Inventory>;

    /// Deliver a user-facing notice to an actor.
    fn notify(&mut self, actor: ActorId, notice: &Notice);
}
