//! # Update Driver
//!
//! One call per simulation frame:
//!
//! ```text
//! tick(registry, world, store)
//!   ├─ global switch off?       → return, nothing touched
//!   ├─ no target in the world?  → return, nothing touched
//!   └─ for each active watcher (insertion order)
//!        ├─ pose from world (skip if the entity is gone)
//!        ├─ vision test
//!        └─ dispatcher (fires reactions on the Unseen → Seen edge)
//! ```
//!
//! The tick allocates nothing; the report is a handful of counters.

use crate::dispatcher::{dispatch, Dispatch};
use crate::registry::WatcherRegistry;
use crate::traits::{FlagStore, WorldModel};

/// Counters for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Active watchers whose vision test ran.
    pub evaluated: u32,
    /// Watchers that fired their reactions this tick.
    pub fired: u32,
    /// Watchers that saw the target but had already fired.
    pub holding: u32,
    /// Active watchers skipped because the world has no entity for them.
    pub missing: u32,
}

impl TickReport {
    /// True if nothing was evaluated.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.evaluated == 0
    }

    /// Adds another report's counters into this one, saturating at
    /// `u32::MAX` so long-running totals never overflow.
    pub fn accumulate(&mut self, other: &Self) {
        self.evaluated = self.evaluated.saturating_add(other.evaluated);
        self.fired = self.fired.saturating_add(other.fired);
        self.holding = self.holding.saturating_add(other.holding);
        self.missing = self.missing.saturating_add(other.missing);
    }
}

/// Runs one tick over every active watcher in `registry`.
pub fn tick(
    registry: &mut WatcherRegistry,
    world: &impl WorldModel,
    store: &mut impl FlagStore,
) -> TickReport {
    let mut report = TickReport::default();
    if !registry.global_enable() {
        return report;
    }
    let Some(target) = world.target() else {
        return report;
    };

    for watcher in registry.active_watchers_mut() {
        let Some(pose) = world.watcher_pose(watcher.id()) else {
            tracing::debug!("Sentinel {} has no entity in the world, skipped", watcher.id());
            report.missing += 1;
            continue;
        };

        report.evaluated += 1;
        let visible = watcher.can_see(pose, &target);
        match dispatch(watcher, visible, store) {
            Dispatch::Fired => {
                report.fired += 1;
                tracing::debug!(
                    watcher = watcher.id().raw(),
                    target_x = target.position.x,
                    target_y = target.position.y,
                    "Sentinel spotted the target"
                );
            }
            Dispatch::Holding => report.holding += 1,
            Dispatch::Idle => {}
        }
    }

    report
}
