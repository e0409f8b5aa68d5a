//! Host switch tables: self switches, game switches and game variables.

use std::collections::HashMap;

use sentinel_core::{FlagStore, ReactionDescriptor};
use sentinel_shared::{StateKey, VariableValue, WatcherId};

use crate::events::{EventSender, SentinelEvent};

/// Switch and variable storage for one save file.
#[derive(Clone, Debug, Default)]
pub struct GameSwitches {
    self_switches: HashMap<(WatcherId, StateKey), bool>,
    switches: HashMap<StateKey, bool>,
    variables: HashMap<StateKey, VariableValue>,
    events: Option<EventSender>,
}

impl GameSwitches {
    /// Creates empty tables that publish nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty tables that publish a [`SentinelEvent::Spotted`] for
    /// every applied reaction.
    #[must_use]
    pub fn with_events(events: EventSender) -> Self {
        Self {
            events: Some(events),
            ..Self::default()
        }
    }

    /// Value of an event's self switch.
    #[must_use]
    pub fn self_switch(&self, event: WatcherId, key: &StateKey) -> bool {
        self.self_switches
            .get(&(event, key.clone()))
            .copied()
            .unwrap_or(false)
    }

    /// Value of a game switch.
    #[must_use]
    pub fn switch(&self, key: &StateKey) -> bool {
        self.switches.get(key).copied().unwrap_or(false)
    }

    /// Value of a game variable.
    #[must_use]
    pub fn variable(&self, key: &StateKey) -> Option<&VariableValue> {
        self.variables.get(key)
    }

    fn publish(&self, watcher: WatcherId, reaction: &ReactionDescriptor) {
        if let Some(events) = &self.events {
            events.send(SentinelEvent::Spotted {
                watcher,
                reaction: reaction.clone(),
            });
        }
    }

    /// Turns every self switch of `event` off, the way a host does when the
    /// event's page resets.
    pub fn clear_self_switches(&mut self, event: WatcherId) {
        self.self_switches.retain(|(owner, _), _| *owner != event);
    }
}

impl FlagStore for GameSwitches {
    fn set_local_flag(&mut self, watcher: WatcherId, flag: &StateKey, value: bool) {
        self.self_switches.insert((watcher, flag.clone()), value);
    }

    fn set_flag(&mut self, flag: &StateKey, value: bool) {
        self.switches.insert(flag.clone(), value);
    }

    fn set_variable(&mut self, var: &StateKey, value: &VariableValue) {
        self.variables.insert(var.clone(), value.clone());
    }

    fn apply_reaction(&mut self, watcher: WatcherId, reaction: &ReactionDescriptor) {
        self.write_reaction(watcher, reaction);
        self.publish(watcher, reaction);
    }
}
