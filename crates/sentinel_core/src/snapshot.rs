//! Save-game state of the engine.
//!
//! Only the global switch and the latches outlive a tick. Profiles are not
//! saved: the host re-runs its `sentinel_add` commands when a map loads and
//! restores the snapshot afterwards.

use serde::{Deserialize, Serialize};

use sentinel_shared::WatcherId;

/// Engine state to include in the host's save file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentinelSnapshot {
    /// Global enable switch.
    pub active: bool,
    /// Watchers whose latch is `Seen`, in registry order.
    pub latched: Vec<WatcherId>,
}

impl SentinelSnapshot {
    /// True if `id` was latched when the snapshot was taken.
    #[must_use]
    pub fn is_latched(&self, id: WatcherId) -> bool {
        self.latched.contains(&id)
    }
}
