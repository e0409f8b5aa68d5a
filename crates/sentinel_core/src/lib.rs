//! # SENTINEL Core
//!
//! Directional watcher engine. Entities registered as watchers look along
//! their facing for a single target; the first time one sees it, its
//! reactions are written to the host's flag store.
//!
//! ## Design Principles
//!
//! 1. **Pure vision test** - integer band comparisons, no geometry
//! 2. **Edge-triggered** - reactions fire once per `Unseen → Seen` transition
//! 3. **Host-agnostic** - the host plugs in through [`WorldModel`] and [`FlagStore`]
//! 4. **Parse once** - payloads become typed profiles at registration time
//!
//! ## Example
//!
//! ```rust,ignore
//! use sentinel_core::{SentinelSystem, WatcherId};
//!
//! let mut system = SentinelSystem::default();
//! system.execute(r#"sentinel_add {"side":2,"forward":7,"selfSwitch":"A"}"#, WatcherId::new(3))?;
//!
//! // once per frame
//! let report = system.tick(&world, &mut switches);
//! ```

#![deny(unsafe_code)]
#![deny(clippy::perf)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod driver;
pub mod error;
pub mod profile;
pub mod registry;
pub mod shared;
pub mod snapshot;
pub mod system;
pub mod traits;
pub mod vision;
pub mod watcher;

pub use command::Command;
pub use config::{ProfileDefaults, SentinelConfig};
pub use dispatcher::{dispatch, Dispatch};
pub use driver::{tick, TickReport};
pub use error::{SentinelError, SentinelResult};
pub use profile::{ProfilePayload, ReactionDescriptor, VariableAssignment, VisionCone, WatcherProfile};
pub use registry::WatcherRegistry;
pub use shared::SharedSentinel;
pub use snapshot::SentinelSnapshot;
pub use system::SentinelSystem;
pub use traits::{FlagStore, MockScheduler, MockWorld, RecordingStore, Scheduler, WorldModel};
pub use vision::can_see;
pub use watcher::{TriggerState, Watcher};

pub use sentinel_shared::{Facing, Pose, StateKey, Target, TilePos, VariableValue, WatcherId};
