//! # Command Channel
//!
//! Parses the host's plugin-command lines:
//!
//! ```text
//! sentinel {"active":true}
//! sentinel_add {"side":2,"forward":7,"selfSwitch":"A"}
//! ```
//!
//! The host interpreter splits command lines on whitespace, so the payload
//! must be a single token: no spaces between braces, keys and values. A
//! payload that spans several tokens is rejected as malformed.

use serde::Deserialize;

use sentinel_shared::WatcherId;

use crate::config::SentinelConfig;
use crate::error::{SentinelError, SentinelResult};
use crate::profile::{ProfilePayload, WatcherProfile};

/// A parsed sentinel command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Turns the whole system on or off.
    SetActive {
        /// New value of the global switch.
        active: bool,
    },
    /// Registers (or replaces) a watcher.
    AddWatcher {
        /// Id from the payload; the calling entity's id when `None`.
        id: Option<WatcherId>,
        /// Profile with defaults applied.
        profile: WatcherProfile,
    },
}

#[derive(Deserialize)]
struct ActivePayload {
    active: bool,
}

impl Command {
    /// Parses one command line sent by entity `source`.
    ///
    /// Returns `Ok(None)` for blank lines and for commands that belong to
    /// someone else.
    ///
    /// # Errors
    ///
    /// Returns `MalformedConfig` attributed to `source` when a sentinel
    /// command carries a missing, split or invalid payload.
    pub fn parse(line: &str, source: WatcherId, config: &SentinelConfig) -> SentinelResult<Option<Self>> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let is_main = name == config.command_main;
        if !is_main && name != config.command_add {
            return Ok(None);
        }

        let payload = tokens
            .next()
            .ok_or_else(|| SentinelError::malformed(source, "missing payload"))?;
        if tokens.next().is_some() {
            return Err(SentinelError::malformed(
                source,
                format!("{payload}...: payload must not contain whitespace"),
            ));
        }

        if is_main {
            Self::parse_active(payload, source).map(Some)
        } else {
            let fields = ProfilePayload::from_payload(payload).map_err(|e| e.with_source(source))?;
            Ok(Some(Self::AddWatcher {
                id: fields.id,
                profile: fields.into_profile(&config.defaults),
            }))
        }
    }

    fn parse_active(payload: &str, source: WatcherId) -> SentinelResult<Self> {
        let parsed: ActivePayload = serde_json::from_str(payload)
            .map_err(|e| SentinelError::malformed(source, format!("{payload}: {e}")))?;
        Ok(Self::SetActive {
            active: parsed.active,
        })
    }
}
