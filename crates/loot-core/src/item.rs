//! Item records and the unsafe-loot classifier.
//!
//! An [`ItemRecord`] is the core's view of one inventory stack: an item kind,
//! a count, and an optional [`ItemMeta`]. The metadata carries exactly the two
//! fields the mechanic inspects, instead of a generic NBT-style key/value
//! tree, so the invariants are checkable at the type level:
//!
//! - an empty stack (count 0) never carries metadata;
//! - metadata with no content is `None`, never an all-default struct, so the
//!   host's stack-merging treats purified items as ordinary items again.
//!
//! All classifier operations are copy-then-modify. An earlier revision of the
//! original mod mutated the passed-in stack in place, which corrupted other
//! slots sharing the same metadata reference; value semantics rule that class
//! of bug out.

use crate::ident::Ident;

/// Prefix prepended to the display name of unsafe-marked items.
/// Uses legacy `§` formatting codes (dark red, then reset).
pub const UNSAFE_NAME_PREFIX: &str = "§4[Unsafe]§r ";

/// The attached metadata the mechanic reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMeta {
    /// The unsafe-loot marker.
    pub unsafe_loot: bool,
    /// Display-name override, shown instead of the item's intrinsic name.
    pub custom_name: Option<String>,
}

impl ItemMeta {
    /// Whether this metadata carries no content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.unsafe_loot && self.custom_name.is_none()
    }
}

/// One stack of identical items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    kind: Ident,
    count: u32,
    meta: Option<ItemMeta>,
}

impl ItemRecord {
    /// Create a plain stack with no metadata.
    #[must_use]
    pub fn new(kind: Ident, count: u32) -> Self {
        Self {
            kind,
            count,
            meta: None,
        }
    }

    /// Attach a display-name override. No-op on empty stacks.
    #[must_use]
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        if !self.is_empty() {
            self.meta
                .get_or_insert_with(|| ItemMeta {
                    unsafe_loot: false,
                    custom_name: None,
                })
                .custom_name = Some(name.into());
        }
        self
    }

    /// The item kind.
    #[must_use]
    pub fn kind(&self) -> &Ident {
        &self.kind
    }

    /// Number of items in the stack.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The attached metadata, if any.
    #[must_use]
    pub fn meta(&self) -> Option<&ItemMeta> {
        self.meta.as_ref()
    }

    /// A stack of count zero is equivalent to no stack at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The name shown to players: the override if present, otherwise the
    /// item's intrinsic name.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.meta
            .as_ref()
            .and_then(|meta| meta.custom_name.clone())
            .unwrap_or_else(|| self.intrinsic_name())
    }

    fn intrinsic_name(&self) -> String {
        self.kind.to_string()
    }

    /// Whether this stack carries the unsafe-loot marker.
    #[must_use]
    pub fn is_unsafe(&self) -> bool {
        !self.is_empty() && self.meta.as_ref().is_some_and(|meta| meta.unsafe_loot)
    }

    /// Return a copy of this stack marked unsafe, its display name prefixed
    /// with [`UNSAFE_NAME_PREFIX`]. The input is never mutated. Marking an
    /// already-unsafe or empty stack returns it unchanged.
    #[must_use]
    pub fn mark_unsafe(&self) -> Self {
        if self.is_empty() || self.is_unsafe() {
            return self.clone();
        }
        let mut marked = self.clone();
        let decorated = format!("{UNSAFE_NAME_PREFIX}{}", self.display_name());
        marked.meta = Some(ItemMeta {
            unsafe_loot: true,
            custom_name: Some(decorated),
        });
        marked
    }

    /// Return a copy of this stack with the unsafe marker stripped.
    ///
    /// If the display-name override carries [`UNSAFE_NAME_PREFIX`], the
    /// prefix is removed; an override that then matches the intrinsic name is
    /// dropped entirely. Metadata left with no content collapses to `None` so
    /// purified stacks merge with plain ones again.
    #[must_use]
    pub fn purify(&self) -> Self {
        let mut purified = self.clone();
        let intrinsic = purified.intrinsic_name();
        if let Some(meta) = purified.meta.as_mut() {
            meta.unsafe_loot = false;
            if let Some(name) = meta.custom_name.as_ref() {
                if name.contains(UNSAFE_NAME_PREFIX) {
                    let stripped = name.replacen(UNSAFE_NAME_PREFIX, "", 1);
                    meta.custom_name = (stripped != intrinsic).then_some(stripped);
                }
            }
        }
        if purified.meta.as_ref().is_some_and(ItemMeta::is_empty) {
            purified.meta = None;
        }
        purified
    }
}
