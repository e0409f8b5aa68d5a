//! # Watcher Defaults
//!
//! Values used when a command payload or configuration file leaves a field out.

// =============================================================================
// VISION GEOMETRY
// =============================================================================

/// Tiles on either side of the facing axis a watcher covers.
pub const DEFAULT_SIDE: u32 = 2;

/// Tiles ahead of the watcher it covers.
pub const DEFAULT_FORWARD: u32 = 7;

/// Watchers are enabled unless the payload says otherwise.
pub const DEFAULT_ENABLED: bool = true;

// =============================================================================
// COMMAND CHANNEL
// =============================================================================

/// Plugin command that toggles the global enable switch.
pub const COMMAND_MAIN: &str = "sentinel";

/// Plugin command that registers the calling event as a watcher.
pub const COMMAND_ADD: &str = "sentinel_add";
