//! Per-actor tracking state and its injectable storage backend.
//!
//! All mutable state the mechanic keeps lives in one [`ActorState`] record
//! per actor, behind the [`StateStorage`] trait. The in-memory
//! [`MemoryStore`] is the production backend for a single game session;
//! tests inject the same type pre-seeded, and a host that wants persistence
//! across restarts can supply its own backend.

use std::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::item::ItemRecord;

/// Stable unique id of a tracked actor (player).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ActorId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Items staged between death and respawn. Most deaths stage a handful of
/// stacks at most, so the buffer lives inline.
pub type RetainedItems = SmallVec<[ItemRecord; 4]>;

/// Everything the mechanic remembers about one actor.
#[derive(Debug, Clone, Default)]
pub struct ActorState {
    /// Currently inside a qualifying structure.
    pub in_zone: bool,
    /// Already rewarded during the current presence session.
    pub rewarded: bool,
    /// Purified stacks awaiting the next respawn.
    pub retained: RetainedItems,
}

impl ActorState {
    /// Whether the record carries no information worth keeping.
    #[must_use]
    pub fn is_default(&self) -> bool {
        !self.in_zone && !self.rewarded && self.retained.is_empty()
    }
}

/// Storage backend for per-actor state, keyed by [`ActorId`].
pub trait StateStorage {
    /// Look up an actor's state, creating a default record on first
    /// observation.
    fn entry(&mut self, actor: ActorId) -> &mut ActorState;

    /// Look up an actor's state without creating it.
    fn get(&self, actor: ActorId) -> Option<&ActorState>;

    /// Remove and return an actor's state.
    fn remove(&mut self, actor: ActorId) -> Option<ActorState>;

    /// Number of actors with a stored record.
    fn len(&self) -> usize;

    /// Whether no actor has a stored record.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory [`StateStorage`] backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: HashMap<ActorId, ActorState>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for MemoryStore {
    fn entry(&mut self, actor: ActorId) -> &mut ActorState {
        self.states.entry(actor).or_default()
    }

    fn get(&self, actor: ActorId) -> Option<&ActorState> {
        self.states.get(&actor)
    }

    fn remove(&mut self, actor: ActorId) -> Option<ActorState> {
        self.states.remove(&actor)
    }

    fn len(&self) -> usize {
        self.states.len()
    }
}
