//! # Sentinel Error Types
//!
//! All errors that can occur in the watcher engine.

use sentinel_shared::WatcherId;
use thiserror::Error;

/// Errors that can occur in the watcher engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SentinelError {
    /// A command payload could not be turned into a profile or toggle.
    #[error("sentinel arguments are malformed (ID: {source_id}): {reason}")]
    MalformedConfig {
        /// Entity whose command carried the payload.
        source_id: WatcherId,
        /// What was wrong with it.
        reason: String,
    },

    /// No watcher is registered under this id.
    #[error("unknown watcher: {0}")]
    UnknownWatcher(WatcherId),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    ConfigIo(String),
}

impl SentinelError {
    /// Builds a `MalformedConfig` error.
    #[must_use]
    pub fn malformed(source_id: WatcherId, reason: impl Into<String>) -> Self {
        Self::MalformedConfig {
            source_id,
            reason: reason.into(),
        }
    }

    /// Returns a copy of a `MalformedConfig` error attributed to `source_id`.
    ///
    /// Payload parsing happens before the caller knows who sent the command,
    /// so the id is patched in at the command boundary.
    #[must_use]
    pub fn with_source(self, source_id: WatcherId) -> Self {
        match self {
            Self::MalformedConfig { reason, .. } => Self::MalformedConfig { source_id, reason },
            other => other,
        }
    }
}

/// Result type for watcher engine operations.
pub type SentinelResult<T> = Result<T, SentinelError>;
