//! # SENTINEL Shared
//!
//! Common value types used by the watcher engine and by the hosts embedding it.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `sentinel_core`
//! - Any game-engine binding
//!
//! If you need engine behaviour, put it in `sentinel_core` or in the host.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod ids;
pub mod math;
pub mod state;

pub use constants::{COMMAND_ADD, COMMAND_MAIN, DEFAULT_FORWARD, DEFAULT_SIDE};
pub use ids::WatcherId;
pub use math::{Facing, Pose, Target, TilePos};
pub use state::{StateKey, VariableValue};
