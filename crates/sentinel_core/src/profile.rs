//! # Watcher Profiles
//!
//! A profile is everything a watcher needs to know about itself: how far it
//! sees and what happens when it spots the target. Profiles are built once,
//! from the `sentinel_add` payload, and never change afterwards.
//!
//! ## Payload
//!
//! ```text
//! {"side":2,"forward":7,"enabled":true,"selfSwitch":"A","gameSwitch":"gs1","gameVariable":{"name":"gv1","value":1}}
//! ```
//!
//! Every key is optional and unknown keys are ignored. `active` is accepted
//! for `enabled` and `gameVariables` for `gameVariable`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sentinel_shared::{StateKey, VariableValue, WatcherId};

use crate::config::ProfileDefaults;
use crate::error::{SentinelError, SentinelResult};

/// Size of the detection band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionCone {
    /// Tiles covered on either side of the facing axis.
    pub side: u32,
    /// Tiles covered ahead of the watcher.
    pub forward: u32,
}

impl VisionCone {
    /// Creates a cone.
    #[inline]
    #[must_use]
    pub const fn new(side: u32, forward: u32) -> Self {
        Self { side, forward }
    }
}

impl Default for VisionCone {
    fn default() -> Self {
        let defaults = ProfileDefaults::default();
        Self::new(defaults.side, defaults.forward)
    }
}

/// What a watcher does to host state the first time it sees the target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReactionDescriptor {
    /// Turn on one of the watcher's own flags.
    LocalFlag {
        /// Flag to turn on.
        flag: StateKey,
    },
    /// Turn on a shared flag.
    GlobalFlag {
        /// Flag to turn on.
        flag: StateKey,
    },
    /// Assign a shared variable.
    Variable {
        /// Variable to assign.
        var: StateKey,
        /// Value to assign.
        value: VariableValue,
    },
}

/// `gameVariable` entry of a payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableAssignment {
    /// Variable to assign.
    #[serde(alias = "id")]
    pub name: StateKey,
    /// Value to assign.
    pub value: VariableValue,
}

/// The raw `sentinel_add` payload, before defaults are applied.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    /// Watcher id; the calling entity's id is used when absent.
    pub id: Option<WatcherId>,
    /// Half-width of the band.
    pub side: Option<u32>,
    /// Depth of the band.
    pub forward: Option<u32>,
    /// Per-watcher toggle.
    #[serde(alias = "active")]
    pub enabled: Option<bool>,
    /// Own flag to turn on.
    pub self_switch: Option<StateKey>,
    /// Shared flag to turn on.
    pub game_switch: Option<StateKey>,
    /// Shared variable to assign.
    #[serde(alias = "gameVariables")]
    pub game_variable: Option<VariableAssignment>,
}

impl ProfilePayload {
    /// Parses a payload. It must be a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `MalformedConfig` (attributed to id 0; see
    /// [`SentinelError::with_source`]) for anything that is not a valid
    /// object.
    pub fn from_payload(payload: &str) -> SentinelResult<Self> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| SentinelError::malformed(WatcherId::default(), format!("{payload}: {e}")))?;
        if !value.is_object() {
            return Err(SentinelError::malformed(
                WatcherId::default(),
                format!("{payload}: expected an object"),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| SentinelError::malformed(WatcherId::default(), format!("{payload}: {e}")))
    }

    /// Applies `defaults` and returns the finished profile.
    #[must_use]
    pub fn into_profile(self, defaults: &ProfileDefaults) -> WatcherProfile {
        let mut reactions = Vec::with_capacity(3);
        if let Some(flag) = self.self_switch {
            reactions.push(ReactionDescriptor::LocalFlag { flag });
        }
        if let Some(flag) = self.game_switch {
            reactions.push(ReactionDescriptor::GlobalFlag { flag });
        }
        if let Some(VariableAssignment { name, value }) = self.game_variable {
            reactions.push(ReactionDescriptor::Variable { var: name, value });
        }

        WatcherProfile {
            cone: VisionCone::new(
                self.side.unwrap_or(defaults.side),
                self.forward.unwrap_or(defaults.forward),
            ),
            enabled: self.enabled.unwrap_or(defaults.enabled),
            reactions,
        }
    }
}

/// Immutable configuration of one watcher.
#[derive(Clone, Debug, PartialEq)]
pub struct WatcherProfile {
    cone: VisionCone,
    enabled: bool,
    reactions: Vec<ReactionDescriptor>,
}

impl Default for WatcherProfile {
    fn default() -> Self {
        ProfilePayload::default().into_profile(&ProfileDefaults::default())
    }
}

impl WatcherProfile {
    /// Creates an enabled profile with no reactions.
    #[must_use]
    pub fn new(cone: VisionCone) -> Self {
        Self {
            cone,
            enabled: true,
            reactions: Vec::new(),
        }
    }

    /// Sets the per-watcher toggle.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Appends a reaction.
    #[must_use]
    pub fn with_reaction(mut self, reaction: ReactionDescriptor) -> Self {
        self.reactions.push(reaction);
        self
    }

    /// Parses a payload using the built-in defaults.
    ///
    /// # Errors
    ///
    /// See [`ProfilePayload::from_payload`].
    pub fn parse(payload: &str) -> SentinelResult<Self> {
        Self::parse_with(payload, &ProfileDefaults::default())
    }

    /// Parses a payload using configured defaults.
    ///
    /// # Errors
    ///
    /// See [`ProfilePayload::from_payload`].
    pub fn parse_with(payload: &str, defaults: &ProfileDefaults) -> SentinelResult<Self> {
        Ok(ProfilePayload::from_payload(payload)?.into_profile(defaults))
    }

    /// Band geometry.
    #[inline]
    #[must_use]
    pub const fn cone(&self) -> VisionCone {
        self.cone
    }

    /// Half-width of the band.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.cone.side
    }

    /// Depth of the band.
    #[inline]
    #[must_use]
    pub const fn forward(&self) -> u32 {
        self.cone.forward
    }

    /// Per-watcher toggle.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reactions in firing order.
    #[inline]
    #[must_use]
    pub fn reactions(&self) -> &[ReactionDescriptor] {
        &self.reactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_and_forward_only() {
        let profile = WatcherProfile::parse(r#"{"side":3,"forward":5}"#).unwrap();
        assert_eq!(profile.side(), 3);
        assert_eq!(profile.forward(), 5);
        assert!(profile.is_enabled());
        assert!(profile.reactions().is_empty());
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        let profile = WatcherProfile::parse("{}").unwrap();
        assert_eq!(profile, WatcherProfile::default());
        assert_eq!(profile.cone(), VisionCone::new(2, 7));
    }

    #[test]
    fn test_full_payload_orders_reactions() {
        let profile = WatcherProfile::parse(
            r#"{"side":2,"forward":7,"active":true,"selfSwitch":"A","gameSwitch":"gs1","gameVariables":{"name":"gv1","value":1}}"#,
        )
        .unwrap();
        assert_eq!(
            profile.reactions(),
            &[
                ReactionDescriptor::LocalFlag { flag: StateKey::name("A") },
                ReactionDescriptor::GlobalFlag { flag: StateKey::name("gs1") },
                ReactionDescriptor::Variable {
                    var: StateKey::name("gv1"),
                    value: VariableValue::Integer(1),
                },
            ]
        );
    }

    #[test]
    fn test_nulls_and_unknown_keys() {
        let profile =
            WatcherProfile::parse(r#"{"gameSwitch":null,"gameVariable":null,"colour":"red"}"#).unwrap();
        assert!(profile.reactions().is_empty());
    }

    #[test]
    fn test_numeric_switch_ids() {
        let profile = WatcherProfile::parse(r#"{"gameSwitch":12,"enabled":false}"#).unwrap();
        assert!(!profile.is_enabled());
        assert_eq!(
            profile.reactions(),
            &[ReactionDescriptor::GlobalFlag { flag: StateKey::Index(12) }]
        );
    }

    #[test]
    fn test_malformed_payloads() {
        for payload in [
            "",
            "{side:2}",
            r#"{"side":-1}"#,
            r#"{"forward":1.5}"#,
            r#"{"enabled":"yes"}"#,
            "[]",
            "7",
            r#"{"gameVariable":{"name":"gv1"}}"#,
        ] {
            let result = WatcherProfile::parse(payload);
            assert!(
                matches!(result, Err(SentinelError::MalformedConfig { .. })),
                "payload {payload:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_configured_defaults() {
        let defaults = ProfileDefaults {
            side: 1,
            forward: 3,
            enabled: false,
        };
        let profile = WatcherProfile::parse_with(r#"{"side":4}"#, &defaults).unwrap();
        assert_eq!(profile.cone(), VisionCone::new(4, 3));
        assert!(!profile.is_enabled());
    }

    #[test]
    fn test_payload_id() {
        let fields = ProfilePayload::from_payload(r#"{"id":9}"#).unwrap();
        assert_eq!(fields.id, Some(WatcherId::new(9)));
    }
}
