//! # Watcher Registry
//!
//! Owns every registered watcher for one world.
//!
//! - Lookup by id is O(1) through an id → slot map.
//! - Iteration follows insertion order, so reactions within a tick fire in a
//!   stable order. Replacing a watcher keeps its slot; removing one keeps the
//!   relative order of the rest.
//! - The global switch gates `active_watchers`; per-watcher toggles live in
//!   the profiles.

use std::collections::{HashMap, HashSet};

use sentinel_shared::WatcherId;

use crate::snapshot::SentinelSnapshot;
use crate::traits::WorldModel;
use crate::watcher::Watcher;

/// All watchers of one world plus the global enable switch.
#[derive(Clone, Debug)]
pub struct WatcherRegistry {
    /// Watchers in insertion order.
    watchers: Vec<Watcher>,
    /// Slot of each watcher in `watchers`.
    index: HashMap<WatcherId, usize>,
    /// Global enable switch.
    global_enable: bool,
}

impl WatcherRegistry {
    /// Creates an empty, enabled registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_global_enable(true)
    }

    /// Creates an empty registry with the given global switch.
    #[must_use]
    pub fn with_global_enable(global_enable: bool) -> Self {
        Self {
            watchers: Vec::with_capacity(64),
            index: HashMap::with_capacity(64),
            global_enable,
        }
    }

    /// Inserts `watcher`, replacing any watcher with the same id.
    ///
    /// A replacement takes the new profile but keeps the old latch; only
    /// [`Self::reset_watcher`] re-arms a watcher.
    ///
    /// Returns the replaced watcher, if any.
    pub fn add(&mut self, mut watcher: Watcher) -> Option<Watcher> {
        let id = watcher.id();
        if let Some(&slot) = self.index.get(&id) {
            if self.watchers[slot].has_seen_target() {
                watcher.latch();
            } else {
                watcher.reset();
            }
            tracing::debug!("Sentinel {} replaced", id);
            return Some(std::mem::replace(&mut self.watchers[slot], watcher));
        }

        tracing::info!(
            "Sentinel {} added (side: {}, forward: {}, enabled: {})",
            id,
            watcher.profile().side(),
            watcher.profile().forward(),
            watcher.profile().is_enabled()
        );
        self.index.insert(id, self.watchers.len());
        self.watchers.push(watcher);
        None
    }

    /// Removes a watcher. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: WatcherId) -> Option<Watcher> {
        let slot = self.index.remove(&id)?;
        let removed = self.watchers.remove(slot);
        for watcher in &self.watchers[slot..] {
            if let Some(shifted) = self.index.get_mut(&watcher.id()) {
                *shifted -= 1;
            }
        }
        tracing::info!("Sentinel {} removed", id);
        Some(removed)
    }

    /// Sets the global enable switch.
    pub fn set_global_enable(&mut self, enabled: bool) {
        if self.global_enable != enabled {
            tracing::info!("Sentinel system {}", if enabled { "enabled" } else { "disabled" });
        }
        self.global_enable = enabled;
    }

    /// Global enable switch.
    #[inline]
    #[must_use]
    pub fn global_enable(&self) -> bool {
        self.global_enable
    }

    /// Watchers that take part in the next tick: enabled ones, and only
    /// while the global switch is on.
    pub fn active_watchers(&self) -> impl Iterator<Item = &Watcher> {
        let global = self.global_enable;
        self.watchers
            .iter()
            .filter(move |w| global && w.profile().is_enabled())
    }

    /// Mutable form of [`Self::active_watchers`].
    pub fn active_watchers_mut(&mut self) -> impl Iterator<Item = &mut Watcher> {
        let global = self.global_enable;
        self.watchers
            .iter_mut()
            .filter(move |w| global && w.profile().is_enabled())
    }

    /// Every watcher, enabled or not, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Watcher> {
        self.watchers.iter()
    }

    /// Looks up a watcher.
    #[must_use]
    pub fn get(&self, id: WatcherId) -> Option<&Watcher> {
        self.index.get(&id).map(|&slot| &self.watchers[slot])
    }

    /// Looks up a watcher for mutation.
    #[must_use]
    pub fn get_mut(&mut self, id: WatcherId) -> Option<&mut Watcher> {
        let slot = *self.index.get(&id)?;
        self.watchers.get_mut(slot)
    }

    /// True if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: WatcherId) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns a watcher's latch to `Unseen`. False if `id` is unknown.
    pub fn reset_watcher(&mut self, id: WatcherId) -> bool {
        match self.get_mut(id) {
            Some(watcher) => {
                watcher.reset();
                tracing::debug!("Sentinel {} reset", id);
                true
            }
            None => false,
        }
    }

    /// Number of registered watchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.watchers.len()
    }

    /// True if no watcher is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watchers.is_empty()
    }

    /// Drops every watcher (map change). The global switch is kept.
    pub fn clear(&mut self) {
        self.watchers.clear();
        self.index.clear();
    }

    /// Drops watchers whose entity no longer exists in `world`.
    ///
    /// Returns how many were dropped.
    pub fn prune(&mut self, world: &impl WorldModel) -> usize {
        let before = self.watchers.len();
        self.watchers.retain(|w| world.watcher_pose(w.id()).is_some());
        let dropped = before - self.watchers.len();
        if dropped > 0 {
            self.rebuild_index();
            tracing::info!("Pruned {} sentinels with no entity", dropped);
        }
        dropped
    }

    /// Captures the state a save file needs.
    #[must_use]
    pub fn snapshot(&self) -> SentinelSnapshot {
        SentinelSnapshot {
            active: self.global_enable,
            latched: self
                .watchers
                .iter()
                .filter(|w| w.has_seen_target())
                .map(Watcher::id)
                .collect(),
        }
    }

    /// Restores the global switch and sets every registered watcher's latch
    /// from `snapshot`. Ids in the snapshot that are not registered are
    /// ignored.
    ///
    /// Returns how many watchers were latched.
    pub fn restore(&mut self, snapshot: &SentinelSnapshot) -> usize {
        self.set_global_enable(snapshot.active);
        let saved: HashSet<WatcherId> = snapshot.latched.iter().copied().collect();
        let mut latched = 0;
        for watcher in &mut self.watchers {
            if saved.contains(&watcher.id()) {
                watcher.latch();
                latched += 1;
            } else {
                watcher.reset();
            }
        }
        latched
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (slot, watcher) in self.watchers.iter().enumerate() {
            self.index.insert(watcher.id(), slot);
        }
    }
}

impl Default for WatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{VisionCone, WatcherProfile};
    use crate::traits::MockWorld;
    use sentinel_shared::{Facing, Pose, TilePos};

    fn watcher(id: u32) -> Watcher {
        Watcher::new(WatcherId::new(id), WatcherProfile::default())
    }

    fn ids(registry: &WatcherRegistry) -> Vec<u32> {
        registry.iter().map(|w| w.id().raw()).collect()
    }

    #[test]
    fn test_add_and_lookup() {
        let mut registry = WatcherRegistry::new();
        assert!(registry.add(watcher(1)).is_none());
        assert!(registry.add(watcher(2)).is_none());

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(WatcherId::new(1)));
        assert!(registry.get(WatcherId::new(3)).is_none());
    }

    #[test]
    fn test_replace_keeps_slot_and_latch() {
        let mut registry = WatcherRegistry::new();
        registry.add(watcher(1));
        registry.add(watcher(2));
        registry.get_mut(WatcherId::new(1)).unwrap().latch();

        let narrow = WatcherProfile::new(VisionCone::new(0, 1));
        let old = registry.add(Watcher::new(WatcherId::new(1), narrow.clone()));

        assert!(old.unwrap().has_seen_target());
        assert_eq!(ids(&registry), vec![1, 2]);
        let current = registry.get(WatcherId::new(1)).unwrap();
        assert_eq!(current.profile(), &narrow);
        assert!(current.has_seen_target());

        // An unseen watcher stays unseen, whatever the replacement carried.
        let mut latched = watcher(2);
        latched.latch();
        registry.add(latched);
        assert!(!registry.get(WatcherId::new(2)).unwrap().has_seen_target());

        assert!(registry.reset_watcher(WatcherId::new(1)));
        registry.add(watcher(1));
        assert!(!registry.get(WatcherId::new(1)).unwrap().has_seen_target());
    }

    #[test]
    fn test_remove_is_idempotent_and_keeps_order() {
        let mut registry = WatcherRegistry::new();
        for id in 1..=4 {
            registry.add(watcher(id));
        }

        assert!(registry.remove(WatcherId::new(2)).is_some());
        assert!(registry.remove(WatcherId::new(2)).is_none());
        assert_eq!(ids(&registry), vec![1, 3, 4]);

        // Index still points at the right slots after the shift.
        assert_eq!(registry.get(WatcherId::new(4)).unwrap().id(), WatcherId::new(4));
        assert_eq!(registry.get(WatcherId::new(3)).unwrap().id(), WatcherId::new(3));
    }

    #[test]
    fn test_active_watchers_filters() {
        let mut registry = WatcherRegistry::new();
        registry.add(watcher(1));
        registry.add(Watcher::new(
            WatcherId::new(2),
            WatcherProfile::default().enabled(false),
        ));
        registry.add(watcher(3));

        let active: Vec<u32> = registry.active_watchers().map(|w| w.id().raw()).collect();
        assert_eq!(active, vec![1, 3]);

        registry.set_global_enable(false);
        assert_eq!(registry.active_watchers().count(), 0);
        assert_eq!(registry.active_watchers_mut().count(), 0);
    }

    #[test]
    fn test_reset_unknown() {
        let mut registry = WatcherRegistry::new();
        assert!(!registry.reset_watcher(WatcherId::new(9)));
    }

    #[test]
    fn test_prune_drops_missing_entities() {
        let mut registry = WatcherRegistry::new();
        let mut world = MockWorld::new();
        for id in 1..=3 {
            registry.add(watcher(id));
        }
        world.place(WatcherId::new(1), Pose::new(TilePos::ORIGIN, Facing::Down));
        world.place(WatcherId::new(3), Pose::new(TilePos::ORIGIN, Facing::Up));

        assert_eq!(registry.prune(&world), 1);
        assert_eq!(ids(&registry), vec![1, 3]);
        assert!(registry.get(WatcherId::new(3)).is_some());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut registry = WatcherRegistry::new();
        for id in 1..=3 {
            registry.add(watcher(id));
        }
        registry.get_mut(WatcherId::new(2)).unwrap().latch();
        registry.set_global_enable(false);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.latched, vec![WatcherId::new(2)]);
        assert!(!snapshot.active);

        let mut reloaded = WatcherRegistry::new();
        for id in 1..=3 {
            reloaded.add(watcher(id));
        }
        reloaded.get_mut(WatcherId::new(1)).unwrap().latch();

        assert_eq!(reloaded.restore(&snapshot), 1);
        assert!(!reloaded.global_enable());
        assert!(!reloaded.get(WatcherId::new(1)).unwrap().has_seen_target());
        assert!(reloaded.get(WatcherId::new(2)).unwrap().has_seen_target());
    }

    #[test]
    fn test_restore_large_snapshot() {
        let mut registry = WatcherRegistry::new();
        for id in 0..2_000 {
            registry.add(watcher(id));
        }
        // Even ids latched, listed twice, plus ids that are not registered.
        let mut latched: Vec<WatcherId> = (0..2_000).step_by(2).map(WatcherId::new).collect();
        let twice = latched.clone();
        latched.extend(twice);
        latched.extend((5_000..5_010).map(WatcherId::new));
        let snapshot = SentinelSnapshot { active: true, latched };

        assert_eq!(registry.restore(&snapshot), 1_000);
        assert!(registry.get(WatcherId::new(1_998)).unwrap().has_seen_target());
        assert!(!registry.get(WatcherId::new(1_999)).unwrap().has_seen_target());
        assert!(!registry.contains(WatcherId::new(5_000)));
    }

    #[test]
    fn test_clear_keeps_global_switch() {
        let mut registry = WatcherRegistry::with_global_enable(false);
        registry.add(watcher(1));
        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.global_enable());
    }
}
