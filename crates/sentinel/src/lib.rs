//! # SENTINEL
//!
//! Reference host for the watcher engine: a tile map, switch tables and a
//! fixed-rate loop, wired together the way a game embeds `sentinel_core`.
//!
//! ```text
//! ┌──────────────┐  poses   ┌──────────────────┐  reactions  ┌──────────────┐
//! │   MapWorld   │────────> │  SentinelSystem  │───────────> │ GameSwitches │
//! └──────────────┘          └──────────────────┘             └──────┬───────┘
//!                                    ^                              │
//!                           tick     │                              v
//!                           ┌────────┴───────┐               ┌──────────────┐
//!                           │  SentinelLoop  │─────────────> │   EventBus   │
//!                           └────────────────┘               └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - `events`: Detection events and their channel
//! - `game_loop`: Fixed-rate frame driver
//! - `switches`: Self switches, game switches, game variables
//! - `world`: Screen-space tile map

pub mod events;
pub mod game_loop;
pub mod switches;
pub mod world;

pub use sentinel_core as core;

pub use events::{EventBus, EventReceiver, EventSender, SentinelEvent};
pub use game_loop::{LoopConfig, LoopStats, SentinelLoop};
pub use switches::GameSwitches;
pub use world::{MapEvent, MapWorld};
