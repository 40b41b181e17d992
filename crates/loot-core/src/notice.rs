//! User-facing notifications raised by the tracker.

use std::fmt;

/// A typed notification. The host adapter renders it into chat text (the
/// `Display` impl is the reference wording) or localizes it as it sees fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The actor stepped into a qualifying structure.
    EnteredZone,
    /// The actor stepped out of a qualifying structure.
    LeftZone,
    /// An unsafe stack was destroyed outside the zone.
    ItemDestroyed { name: String, count: u32 },
    /// The one-per-session reward was granted.
    RewardGranted { name: String },
    /// Retained stacks were returned after respawn.
    ItemsRestored { stacks: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnteredZone => {
                write!(f, "You have entered an unsafe structure. Its loot cannot leave.")
            }
            Self::LeftZone => write!(f, "You have left the unsafe structure."),
            Self::ItemDestroyed { name, count } => {
                write!(f, "{count}x {name} crumbled to dust outside the structure.")
            }
            Self::RewardGranted { name } => {
                write!(f, "The structure yields a {name}. It will not survive outside.")
            }
            Self::ItemsRestored { stacks } => {
                write!(f, "{stacks} purified stack(s) returned to you.")
            }
        }
    }
}
