//! Hardcore-loot tracking core.
//!
//! Items obtained inside designated structures ("zones") carry an unsafe
//! marker. The tracker polls each actor's position on a fixed tick cadence:
//! stepping into a zone grants a one-time reward, and unsafe items observed
//! outside a zone are destroyed. Dying inside a zone stages purified copies
//! of the unsafe stacks, which the next respawn hands back.
//!
//! The crate is host-independent: the game server is reached only through
//! the traits in [`host`], and all per-actor state sits behind the
//! injectable [`state::StateStorage`] backend. A thin adapter wires the four
//! [`tracker::LootTracker`] callbacks to the real server's hooks.
//!
//! # Example
//!
//! ```ignore
//! use loot_core::{LootTracker, presence::AllowAll};
//!
//! let mut tracker = LootTracker::new(AllowAll).with_poll_interval(4);
//!
//! // From the host's hooks, all on the tick thread:
//! tracker.on_tick(tick, &mut world);
//! tracker.on_death(actor, &world);
//! tracker.on_respawn(actor, actor, &mut world);
//! tracker.on_disconnect(actor);
//! ```

pub mod buffer;
pub mod gate;
pub mod host;
pub mod ident;
pub mod item;
pub mod notice;
pub mod presence;
pub mod state;
pub mod sweep;
pub mod tracker;

pub use host::{BlockPos, Delivery, HostWorld, Inventory, Placement, SlotInventory, StructureIndex};
pub use ident::{Ident, IdentError};
pub use item::{ItemMeta, ItemRecord, UNSAFE_NAME_PREFIX};
pub use notice::Notice;
pub use presence::{StructureFilter, Transition};
pub use state::{ActorId, ActorState, MemoryStore, StateStorage};
pub use tracker::{DEFAULT_POLL_INTERVAL, LootTracker};
