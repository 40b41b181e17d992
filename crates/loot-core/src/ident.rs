//! Namespaced identifiers (`namespace:path`) for structure and item kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when parsing an [`Ident`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentError {
    /// The namespace contains a character outside `[a-z0-9_.-]`.
    #[error("invalid character {1:?} in namespace of {0:?}")]
    InvalidNamespace(String, char),

    /// The path contains a character outside `[a-z0-9_.\-/]`.
    #[error("invalid character {1:?} in path of {0:?}")]
    InvalidPath(String, char),

    /// Namespace or path is empty.
    #[error("empty namespace or path in {0:?}")]
    Empty(String),
}

/// A namespaced identifier, e.g. `minecraft:village_plains`.
///
/// Identifiers without an explicit namespace default to `minecraft`, matching
/// the game's own parsing rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ident(Box<str>);

impl Ident {
    /// The namespace the game assumes when none is given.
    pub const DEFAULT_NAMESPACE: &'static str = "minecraft";

    /// Parse an identifier, defaulting the namespace to
    /// [`Self::DEFAULT_NAMESPACE`] when no `:` is present.
    pub fn new(raw: &str) -> Result<Self, IdentError> {
        let (namespace, path) = match raw.split_once(':') {
            Some(parts) => parts,
            None => (Self::DEFAULT_NAMESPACE, raw),
        };
        if namespace.is_empty() || path.is_empty() {
            return Err(IdentError::Empty(raw.to_owned()));
        }
        if let Some(bad) = namespace
            .chars()
            .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-'))
        {
            return Err(IdentError::InvalidNamespace(raw.to_owned(), bad));
        }
        if let Some(bad) = path
            .chars()
            .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-' | '/'))
        {
            return Err(IdentError::InvalidPath(raw.to_owned(), bad));
        }
        Ok(Self(format!("{namespace}:{path}").into_boxed_str()))
    }

    /// Parse a known-good identifier literal.
    ///
    /// # Panics
    /// Panics if the literal is not a valid identifier; intended only for
    /// compile-time-known strings.
    #[must_use]
    pub fn literal(raw: &str) -> Self {
        match Self::new(raw) {
            Ok(ident) => ident,
            Err(err) => panic!("invalid identifier literal {raw:?}: {err}"),
        }
    }

    /// The namespace component.
    #[must_use]
    pub fn namespace(&self) -> &str {
        // Constructor guarantees exactly one ':'.
        self.0.split_once(':').map_or("", |(ns, _)| ns)
    }

    /// The path component.
    #[must_use]
    pub fn path(&self) -> &str {
        self.0.split_once(':').map_or(&self.0, |(_, path)| path)
    }

    /// The full `namespace:path` form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ident {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ident {
    type Error = IdentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Ident> for String {
    fn from(ident: Ident) -> Self {
        ident.0.into_string()
    }
}
