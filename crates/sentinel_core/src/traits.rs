//! # Integration Traits
//!
//! The engine never reaches into the host. The host implements these traits
//! and hands them to the update driver.
//!
//! ```text
//! Engine defines:       Host implements:
//! ┌───────────────┐     ┌───────────────┐
//! │ WorldModel    │ ←── │ map / events  │
//! │ FlagStore     │ ←── │ switch tables │
//! │ Scheduler     │ ←── │ frame loop    │
//! └───────────────┘     └───────────────┘
//! ```

use std::collections::HashMap;

use sentinel_shared::{Pose, StateKey, Target, VariableValue, WatcherId};

use crate::driver::TickReport;
use crate::profile::ReactionDescriptor;

// ============================================================================
// WORLD MODEL - Read-only view of positions
// ============================================================================

/// Read-only view of where entities stand.
pub trait WorldModel {
    /// Pose of the entity carrying watcher `id`, or `None` if the entity is
    /// not in the world.
    fn watcher_pose(&self, id: WatcherId) -> Option<Pose>;

    /// The entity watchers look for, or `None` if there is none yet.
    fn target(&self) -> Option<Target>;
}

// ============================================================================
// FLAG STORE - Where reactions land
// ============================================================================

/// Host storage for flags and variables.
pub trait FlagStore {
    /// Sets one of `watcher`'s own flags.
    fn set_local_flag(&mut self, watcher: WatcherId, flag: &StateKey, value: bool);

    /// Sets a shared flag.
    fn set_flag(&mut self, flag: &StateKey, value: bool);

    /// Assigns a shared variable.
    fn set_variable(&mut self, var: &StateKey, value: &VariableValue);

    /// Routes a reaction to the matching setter: flags are turned on,
    /// variables assigned.
    fn write_reaction(&mut self, watcher: WatcherId, reaction: &ReactionDescriptor) {
        match reaction {
            ReactionDescriptor::LocalFlag { flag } => self.set_local_flag(watcher, flag, true),
            ReactionDescriptor::GlobalFlag { flag } => self.set_flag(flag, true),
            ReactionDescriptor::Variable { var, value } => self.set_variable(var, value),
        }
    }

    /// Applies one reaction fired by `watcher`.
    ///
    /// The default is [`Self::write_reaction`]; override it to observe every
    /// reaction in one place.
    fn apply_reaction(&mut self, watcher: WatcherId, reaction: &ReactionDescriptor) {
        self.write_reaction(watcher, reaction);
    }
}

// ============================================================================
// SCHEDULER - Who advances time
// ============================================================================

/// Calls the tick once per frame.
pub trait Scheduler {
    /// Runs frames until the scheduler stops, passing the frame number to
    /// `tick`. Returns the number of frames run.
    fn run(&mut self, tick: &mut dyn FnMut(u64) -> TickReport) -> u64;
}

// ============================================================================
// MOCK IMPLEMENTATIONS (For Testing)
// ============================================================================

/// In-memory world for tests.
#[derive(Clone, Debug, Default)]
pub struct MockWorld {
    poses: HashMap<WatcherId, Pose>,
    target: Option<Target>,
}

impl MockWorld {
    /// Creates an empty world with no target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places (or moves) an entity.
    pub fn place(&mut self, id: WatcherId, pose: Pose) {
        self.poses.insert(id, pose);
    }

    /// Removes an entity.
    pub fn despawn(&mut self, id: WatcherId) {
        self.poses.remove(&id);
    }

    /// Sets or clears the target.
    pub fn set_target(&mut self, target: Option<Target>) {
        self.target = target;
    }
}

impl WorldModel for MockWorld {
    fn watcher_pose(&self, id: WatcherId) -> Option<Pose> {
        self.poses.get(&id).copied()
    }

    fn target(&self) -> Option<Target> {
        self.target
    }
}

/// Flag store that keeps every write for inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingStore {
    local_flags: HashMap<(WatcherId, StateKey), bool>,
    flags: HashMap<StateKey, bool>,
    variables: HashMap<StateKey, VariableValue>,
    writes: usize,
}

impl RecordingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of one of `watcher`'s flags (off if never written).
    #[must_use]
    pub fn local_flag(&self, watcher: WatcherId, flag: &StateKey) -> bool {
        self.local_flags
            .get(&(watcher, flag.clone()))
            .copied()
            .unwrap_or(false)
    }

    /// Value of a shared flag (off if never written).
    #[must_use]
    pub fn flag(&self, flag: &StateKey) -> bool {
        self.flags.get(flag).copied().unwrap_or(false)
    }

    /// Value of a shared variable.
    #[must_use]
    pub fn variable(&self, var: &StateKey) -> Option<&VariableValue> {
        self.variables.get(var)
    }

    /// Total number of writes received.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl FlagStore for RecordingStore {
    fn set_local_flag(&mut self, watcher: WatcherId, flag: &StateKey, value: bool) {
        self.local_flags.insert((watcher, flag.clone()), value);
        self.writes += 1;
    }

    fn set_flag(&mut self, flag: &StateKey, value: bool) {
        self.flags.insert(flag.clone(), value);
        self.writes += 1;
    }

    fn set_variable(&mut self, var: &StateKey, value: &VariableValue) {
        self.variables.insert(var.clone(), value.clone());
        self.writes += 1;
    }
}

/// Scheduler that runs a fixed number of frames back to back.
#[derive(Clone, Copy, Debug)]
pub struct MockScheduler {
    frames: u64,
}

impl MockScheduler {
    /// Creates a scheduler that runs `frames` frames.
    #[must_use]
    pub const fn new(frames: u64) -> Self {
        Self { frames }
    }
}

impl Scheduler for MockScheduler {
    fn run(&mut self, tick: &mut dyn FnMut(u64) -> TickReport) -> u64 {
        for frame in 0..self.frames {
            let _ = tick(frame);
        }
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_apply_reaction_routes_by_kind() {
        let mut store = RecordingStore::new();
        let watcher = WatcherId::new(3);

        store.apply_reaction(watcher, &ReactionDescriptor::LocalFlag { flag: StateKey::name("A") });
        store.apply_reaction(watcher, &ReactionDescriptor::GlobalFlag { flag: StateKey::Index(4) });
        store.apply_reaction(
            watcher,
            &ReactionDescriptor::Variable {
                var: StateKey::name("alarm"),
                value: VariableValue::Integer(2),
            },
        );

        assert!(store.local_flag(watcher, &StateKey::name("A")));
        assert!(!store.local_flag(WatcherId::new(4), &StateKey::name("A")));
        assert!(store.flag(&StateKey::Index(4)));
        assert_eq!(store.variable(&StateKey::name("alarm")), Some(&VariableValue::Integer(2)));
        assert_eq!(store.writes(), 3);
    }

    #[test]
    fn test_overridden_apply_reaction_reuses_routing() {
        struct Counting {
            inner: RecordingStore,
            applied: usize,
        }

        impl FlagStore for Counting {
            fn set_local_flag(&mut self, watcher: WatcherId, flag: &StateKey, value: bool) {
                self.inner.set_local_flag(watcher, flag, value);
            }

            fn set_flag(&mut self, flag: &StateKey, value: bool) {
                self.inner.set_flag(flag, value);
            }

            fn set_variable(&mut self, var: &StateKey, value: &VariableValue) {
                self.inner.set_variable(var, value);
            }

            fn apply_reaction(&mut self, watcher: WatcherId, reaction: &ReactionDescriptor) {
                self.write_reaction(watcher, reaction);
                self.applied += 1;
            }
        }

        let mut store = Counting {
            inner: RecordingStore::new(),
            applied: 0,
        };
        let watcher = WatcherId::new(8);
        store.apply_reaction(watcher, &ReactionDescriptor::LocalFlag { flag: StateKey::name("B") });
        store.apply_reaction(watcher, &ReactionDescriptor::GlobalFlag { flag: StateKey::Index(2) });

        assert_eq!(store.applied, 2);
        assert!(store.inner.local_flag(watcher, &StateKey::name("B")));
        assert!(store.inner.flag(&StateKey::Index(2)));
        assert_eq!(store.inner.writes(), 2);
    }

    #[test]
    fn test_mock_scheduler_counts_frames() {
        let mut seen = Vec::new();
        let ran = MockScheduler::new(3).run(&mut |frame| {
            seen.push(frame);
            TickReport::default()
        });
        assert_eq!(ran, 3);
        assert_eq!(seen, vec![0, 1, 2]);
    }
}
