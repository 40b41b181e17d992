//! Zone-presence detection and transition edges.

use tracing::warn;

use crate::host::{BlockPos, Placement, StructureIndex};
use crate::ident::Ident;
use crate::state::ActorState;

/// Decides which structure kinds qualify as zones.
///
/// The config crate's whitelist/blacklist implements this; tests supply
/// closures or fixed predicates.
pub trait StructureFilter {
    /// Whether `kind` counts as a zone.
    fn allows(&self, kind: &Ident) -> bool;
}

/// Filter that admits every structure kind. Useful for hosts that want the
/// mechanic everywhere, and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl StructureFilter for AllowAll {
    fn allows(&self, _kind: &Ident) -> bool {
        true
    }
}

/// Edge produced by comparing a fresh presence sample against stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Outside on the previous poll, inside now.
    Entered,
    /// Inside on the previous poll, outside now.
    Left,
    /// No edge.
    Unchanged,
}

/// Whether `pos` lies inside any qualifying, fully generated structure.
///
/// Scans every kind the registry knows, skipping kinds the filter rejects,
/// and short-circuits on the first hit. Lookup errors are logged and treated
/// as absent; a broken registry entry must never destroy items on its own.
///
/// The scan is O(registered kinds) per call. At the poll cadence (a few
/// times per second per actor at most) that is cheap; a spatial index can
/// slot in behind [`StructureIndex`] if a modded registry grows large.
pub fn is_in_zone<F>(filter: &F, index: &dyn StructureIndex, pos: BlockPos) -> bool
where
    F: StructureFilter + ?Sized,
{
    for kind in index.kinds() {
        if !filter.allows(&kind) {
            continue;
        }
        match index.placement_at(&kind, pos) {
            Ok(Placement::Generated) => return true,
            Ok(Placement::Absent | Placement::Placeholder) => {}
            Err(err) => warn!(structure = %kind, "structure lookup failed, treating as absent: {err}"),
        }
    }
    false
}

/// Compare a fresh sample against the stored presence flag, store the sample,
/// and return the edge.
pub fn check_transition(state: &mut ActorState, currently_in_zone: bool) -> Transition {
    let transition = match (state.in_zone, currently_in_zone) {
        (false, true) => Transition::Entered,
        (true, false) => Transition::Left,
        _ => Transition::Unchanged,
    };
    state.in_zone = currently_in_zone;
    transition
}
