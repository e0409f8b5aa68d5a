//! A registered watcher and its edge-trigger latch.

use sentinel_shared::{Pose, Target, WatcherId};

use crate::profile::WatcherProfile;
use crate::vision;

/// Edge-trigger state of a watcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerState {
    /// Has not seen the target since creation or the last reset.
    #[default]
    Unseen,
    /// Has seen the target; reactions already fired.
    Seen,
}

/// One entity that can detect the target.
///
/// Position and facing belong to the world model and are read each tick;
/// the watcher itself only keeps its profile and latch.
#[derive(Clone, Debug, PartialEq)]
pub struct Watcher {
    id: WatcherId,
    profile: WatcherProfile,
    trigger: TriggerState,
}

impl Watcher {
    /// Creates an unseen watcher.
    #[must_use]
    pub fn new(id: WatcherId, profile: WatcherProfile) -> Self {
        Self {
            id,
            profile,
            trigger: TriggerState::Unseen,
        }
    }

    /// Entity id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> WatcherId {
        self.id
    }

    /// Immutable configuration.
    #[inline]
    #[must_use]
    pub const fn profile(&self) -> &WatcherProfile {
        &self.profile
    }

    /// Current latch state.
    #[inline]
    #[must_use]
    pub const fn trigger(&self) -> TriggerState {
        self.trigger
    }

    /// True once reactions have fired and until the next reset.
    #[inline]
    #[must_use]
    pub fn has_seen_target(&self) -> bool {
        self.trigger == TriggerState::Seen
    }

    /// Runs the vision test from `pose`.
    #[inline]
    #[must_use]
    pub fn can_see(&self, pose: Pose, target: &Target) -> bool {
        vision::can_see(pose, self.profile.cone(), target)
    }

    pub(crate) fn latch(&mut self) {
        self.trigger = TriggerState::Seen;
    }

    /// Returns the latch to `Unseen`.
    pub fn reset(&mut self) {
        self.trigger = TriggerState::Unseen;
    }
}
