//! # Shared Sentinel
//!
//! A [`SentinelSystem`] behind one `parking_lot::Mutex`, for embeddings that
//! issue commands and ticks from more than one thread. The whole tick runs
//! under the lock; ticks are short, so a single coarse lock is enough.

use std::sync::Arc;

use parking_lot::Mutex;

use sentinel_shared::WatcherId;

use crate::driver::TickReport;
use crate::error::SentinelResult;
use crate::snapshot::SentinelSnapshot;
use crate::system::SentinelSystem;
use crate::traits::{FlagStore, WorldModel};

/// Cloneable, thread-safe handle to one [`SentinelSystem`].
#[derive(Clone, Debug)]
pub struct SharedSentinel {
    inner: Arc<Mutex<SentinelSystem>>,
}

impl SharedSentinel {
    /// Wraps a system.
    #[must_use]
    pub fn new(system: SentinelSystem) -> Self {
        Self {
            inner: Arc::new(Mutex::new(system)),
        }
    }

    /// Runs a command line under the lock.
    ///
    /// # Errors
    ///
    /// See [`SentinelSystem::execute`].
    pub fn execute(&self, line: &str, source: WatcherId) -> SentinelResult<bool> {
        self.inner.lock().execute(line, source)
    }

    /// Runs one full tick under the lock.
    pub fn tick(&self, world: &impl WorldModel, store: &mut impl FlagStore) -> TickReport {
        self.inner.lock().tick(world, store)
    }

    /// Re-arms a watcher under the lock.
    ///
    /// # Errors
    ///
    /// See [`SentinelSystem::reset_watcher`].
    pub fn reset_watcher(&self, id: WatcherId) -> SentinelResult<()> {
        self.inner.lock().reset_watcher(id)
    }

    /// Save-file state.
    #[must_use]
    pub fn snapshot(&self) -> SentinelSnapshot {
        self.inner.lock().snapshot()
    }

    /// Runs `f` with exclusive access to the system.
    pub fn with<R>(&self, f: impl FnOnce(&mut SentinelSystem) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<SentinelSystem> for SharedSentinel {
    fn from(system: SentinelSystem) -> Self {
        Self::new(system)
    }
}
