//! Identifiers shared between the engine and its hosts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a watcher, equal to the id of the map entity that carries it.
///
/// Stable for the lifetime of the entity; the host owns the numbering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatcherId(pub u32);

impl WatcherId {
    /// Creates an id from the host's raw entity number.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw entity number.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for WatcherId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for WatcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
