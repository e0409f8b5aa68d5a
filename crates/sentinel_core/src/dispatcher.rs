//! # Trigger Dispatcher
//!
//! Edge-triggered reaction firing, one latch per watcher:
//!
//! ```text
//!            visible / apply reactions
//!   Unseen ─────────────────────────────> Seen ──┐ visible / nothing
//!     ^                                     │ <──┘
//!     └──────────── reset_watcher ──────────┘
//! ```
//!
//! There is no automatic way back to `Unseen`: losing sight of the target
//! keeps the latch, the same way a self switch stays on until an event turns
//! it off.

use crate::traits::FlagStore;
use crate::watcher::{TriggerState, Watcher};

/// What one dispatch did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Target not visible; nothing changed.
    Idle,
    /// Target just became visible; reactions were applied.
    Fired,
    /// Target still visible after an earlier firing; nothing applied.
    Holding,
}

/// Feeds one vision result into `watcher`'s latch, applying its reactions on
/// the `Unseen → Seen` edge.
pub fn dispatch(watcher: &mut Watcher, visible: bool, store: &mut impl FlagStore) -> Dispatch {
    if !visible {
        return Dispatch::Idle;
    }

    match watcher.trigger() {
        TriggerState::Seen => Dispatch::Holding,
        TriggerState::Unseen => {
            for reaction in watcher.profile().reactions() {
                store.apply_reaction(watcher.id(), reaction);
            }
            watcher.latch();
            Dispatch::Fired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ReactionDescriptor, WatcherProfile};
    use crate::traits::RecordingStore;
    use sentinel_shared::{StateKey, WatcherId};

    fn alarmed_watcher() -> Watcher {
        let profile = WatcherProfile::default()
            .with_reaction(ReactionDescriptor::LocalFlag { flag: StateKey::name("A") })
            .with_reaction(ReactionDescriptor::GlobalFlag { flag: StateKey::Index(1) });
        Watcher::new(WatcherId::new(7), profile)
    }

    #[test]
    fn test_fires_once_then_holds() {
        let mut watcher = alarmed_watcher();
        let mut store = RecordingStore::new();

        assert_eq!(dispatch(&mut watcher, true, &mut store), Dispatch::Fired);
        assert_eq!(store.writes(), 2);
        for _ in 0..10 {
            assert_eq!(dispatch(&mut watcher, true, &mut store), Dispatch::Holding);
        }
        assert_eq!(store.writes(), 2);
        assert!(watcher.has_seen_target());
    }

    #[test]
    fn test_losing_sight_keeps_latch() {
        let mut watcher = alarmed_watcher();
        let mut store = RecordingStore::new();

        dispatch(&mut watcher, true, &mut store);
        assert_eq!(dispatch(&mut watcher, false, &mut store), Dispatch::Idle);
        assert_eq!(dispatch(&mut watcher, true, &mut store), Dispatch::Holding);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_reset_rearms() {
        let mut watcher = alarmed_watcher();
        let mut store = RecordingStore::new();

        dispatch(&mut watcher, true, &mut store);
        watcher.reset();
        assert_eq!(dispatch(&mut watcher, true, &mut store), Dispatch::Fired);
        assert_eq!(store.writes(), 4);
    }

    #[test]
    fn test_no_reactions_still_latches() {
        let mut watcher = Watcher::new(WatcherId::new(1), WatcherProfile::default());
        let mut store = RecordingStore::new();

        assert_eq!(dispatch(&mut watcher, true, &mut store), Dispatch::Fired);
        assert!(watcher.has_seen_target());
        assert_eq!(store.writes(), 0);
    }
}
