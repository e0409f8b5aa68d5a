//! # Sentinel System
//!
//! The object a host constructs and keeps for the lifetime of a world. It
//! owns the registry and configuration, turns command lines into registry
//! changes, and forwards ticks to the update driver.

use sentinel_shared::WatcherId;

use crate::command::Command;
use crate::config::SentinelConfig;
use crate::driver::{self, TickReport};
use crate::error::{SentinelError, SentinelResult};
use crate::registry::WatcherRegistry;
use crate::snapshot::SentinelSnapshot;
use crate::traits::{FlagStore, WorldModel};
use crate::watcher::Watcher;

/// Watcher engine for one world.
#[derive(Clone, Debug)]
pub struct SentinelSystem {
    config: SentinelConfig,
    registry: WatcherRegistry,
}

impl SentinelSystem {
    /// Creates an engine with no watchers.
    #[must_use]
    pub fn new(config: SentinelConfig) -> Self {
        let registry = WatcherRegistry::with_global_enable(config.active);
        Self { config, registry }
    }

    /// Runs one command line sent by entity `source`.
    ///
    /// Returns `Ok(true)` if the line was a sentinel command and was applied,
    /// `Ok(false)` if it belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns `MalformedConfig` for a bad payload. The error is already
    /// logged and the registry is unchanged; hosts may ignore it.
    pub fn execute(&mut self, line: &str, source: WatcherId) -> SentinelResult<bool> {
        match Command::parse(line, source, &self.config) {
            Ok(Some(command)) => {
                self.handle(command, source);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                tracing::error!("{e}");
                Err(e)
            }
        }
    }

    /// Applies an already parsed command.
    pub fn handle(&mut self, command: Command, source: WatcherId) {
        match command {
            Command::SetActive { active } => self.registry.set_global_enable(active),
            Command::AddWatcher { id, profile } => {
                let id = id.unwrap_or(source);
                self.registry.add(Watcher::new(id, profile));
            }
        }
    }

    /// Runs one tick. Call once per frame.
    pub fn tick(&mut self, world: &impl WorldModel, store: &mut impl FlagStore) -> TickReport {
        driver::tick(&mut self.registry, world, store)
    }

    /// Returns a watcher's latch to `Unseen` so it can fire again.
    ///
    /// # Errors
    ///
    /// Returns `UnknownWatcher` if `id` is not registered.
    pub fn reset_watcher(&mut self, id: WatcherId) -> SentinelResult<()> {
        if self.registry.reset_watcher(id) {
            Ok(())
        } else {
            Err(SentinelError::UnknownWatcher(id))
        }
    }

    /// Removes a watcher whose entity left the world. Idempotent.
    pub fn remove_watcher(&mut self, id: WatcherId) -> bool {
        self.registry.remove(id).is_some()
    }

    /// Drops every watcher; call when the host loads another map.
    pub fn on_map_change(&mut self) {
        self.registry.clear();
    }

    /// Registry, read-only.
    #[must_use]
    pub fn registry(&self) -> &WatcherRegistry {
        &self.registry
    }

    /// Registry, for hosts that register watchers directly.
    #[must_use]
    pub fn registry_mut(&mut self) -> &mut WatcherRegistry {
        &mut self.registry
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SentinelConfig {
        &self.config
    }

    /// State for the host's save file.
    #[must_use]
    pub fn snapshot(&self) -> SentinelSnapshot {
        self.registry.snapshot()
    }

    /// Restores state from a save file. Returns how many watchers were latched.
    pub fn restore(&mut self, snapshot: &SentinelSnapshot) -> usize {
        self.registry.restore(snapshot)
    }
}

impl Default for SentinelSystem {
    fn default() -> Self {
        Self::new(SentinelConfig::default())
    }
}
