//! # Sentinel Configuration
//!
//! Host-level settings, loaded once at startup from TOML:
//!
//! ```toml
//! active = true
//! command_main = "sentinel"
//! command_add = "sentinel_add"
//!
//! [defaults]
//! side = 2
//! forward = 7
//! enabled = true
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;

use sentinel_shared::constants::{
    COMMAND_ADD, COMMAND_MAIN, DEFAULT_ENABLED, DEFAULT_FORWARD, DEFAULT_SIDE,
};

use crate::error::{SentinelError, SentinelResult};

/// Values applied to fields a watcher payload leaves out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDefaults {
    /// Half-width of the detection band.
    pub side: u32,
    /// Depth of the detection band.
    pub forward: u32,
    /// Whether new watchers start enabled.
    pub enabled: bool,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            side: DEFAULT_SIDE,
            forward: DEFAULT_FORWARD,
            enabled: DEFAULT_ENABLED,
        }
    }
}

/// Configuration for a [`crate::SentinelSystem`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    /// Initial value of the global enable switch.
    pub active: bool,
    /// Command name that toggles the global switch.
    pub command_main: String,
    /// Command name that registers a watcher.
    pub command_add: String,
    /// Defaults for watcher payloads.
    pub defaults: ProfileDefaults,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            active: true,
            command_main: COMMAND_MAIN.to_owned(),
            command_add: COMMAND_ADD.to_owned(),
            defaults: ProfileDefaults::default(),
        }
    }
}

impl SentinelConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document does not parse or the command
    /// names are unusable.
    pub fn from_toml_str(source: &str) -> SentinelResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| SentinelError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigIo` if the file cannot be read, otherwise see
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SentinelResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| SentinelError::ConfigIo(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(
            "Loaded sentinel config from {} (active: {})",
            path.display(),
            config.active
        );
        Ok(config)
    }

    /// Checks the command names and flags odd defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for empty, whitespace-containing or identical
    /// command names, since the command line is split on whitespace.
    pub fn validate(&self) -> SentinelResult<()> {
        for name in [&self.command_main, &self.command_add] {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(SentinelError::InvalidConfig(format!(
                    "command name {name:?} must be a single non-empty word"
                )));
            }
        }
        if self.command_main == self.command_add {
            return Err(SentinelError::InvalidConfig(format!(
                "command_main and command_add are both {:?}",
                self.command_main
            )));
        }
        if self.defaults.forward == 0 {
            tracing::warn!("defaults.forward is 0: watchers without an explicit forward see nothing");
        }
        Ok(())
    }
}
