//! Structure whitelist/blacklist configuration.
//!
//! A single JSON file under the host's config directory decides which
//! structure kinds qualify as zones:
//!
//! ```json
//! {
//!   "whitelist": ["minecraft:village_plains"],
//!   "blacklist": ["minecraft:stronghold"]
//! }
//! ```
//!
//! An empty whitelist admits every kind not blacklisted. The file is read
//! once at startup and written with the documented defaults when absent.
//! [`FilterConfig::load`] never fails: any I/O or parse problem falls back
//! to the defaults with a logged warning, so a corrupt file can never
//! silently disable the mechanic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use loot_core::Ident;
use loot_core::presence::StructureFilter;

/// Location of the config file relative to the host's config directory.
pub const CONFIG_RELATIVE_PATH: &str = "unsafeloots/structures.json";

/// Error from the fallible loader.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or creating the file failed.
    #[error("structure config io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not the expected JSON document.
    #[error("malformed structure config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The whitelist/blacklist of structure kinds, immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Kinds that qualify as zones; empty means "all kinds".
    #[serde(default)]
    pub whitelist: Vec<Ident>,

    /// Kinds that never qualify, even when whitelisted.
    #[serde(default)]
    pub blacklist: Vec<Ident>,
}

impl FilterConfig {
    /// The documented default filter.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            whitelist: vec![Ident::literal("minecraft:village_plains")],
            blacklist: vec![Ident::literal("minecraft:stronghold")],
        }
    }

    /// Load the filter from `<config_dir>/unsafeloots/structures.json`,
    /// writing the defaults first if the file does not exist.
    ///
    /// Never fails: on any error the documented defaults are returned with a
    /// warning, keeping unsafe items tracked somewhere rather than turning
    /// the filter off.
    #[must_use]
    pub fn load(config_dir: &Path) -> Self {
        match Self::try_load(config_dir) {
            Ok(config) => config,
            Err(err) => {
                warn!("failed to load structure config, falling back to defaults: {err}");
                Self::defaults()
            }
        }
    }

    /// The fallible form of [`Self::load`].
    pub fn try_load(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::config_path(config_dir);
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let defaults = Self::defaults();
            fs::write(&path, serde_json::to_string_pretty(&defaults)?)?;
            info!(path = %path.display(), "wrote default structure config");
            return Ok(defaults);
        }
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Full path of the config file under `config_dir`.
    #[must_use]
    pub fn config_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_RELATIVE_PATH)
    }

    /// Whether `kind` qualifies as a zone: on the whitelist (or the
    /// whitelist is empty) and not on the blacklist.
    #[must_use]
    pub fn allows(&self, kind: &Ident) -> bool {
        (self.whitelist.is_empty() || self.whitelist.contains(kind))
            && !self.blacklist.contains(kind)
    }
}

impl StructureFilter for FilterConfig {
    fn allows(&self, kind: &Ident) -> bool {
        Self::allows(self, kind)
    }
}
