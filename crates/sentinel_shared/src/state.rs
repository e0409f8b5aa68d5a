//! Keys and values for host-owned flags and variables.
//!
//! The engine never stores these; it only names them when a reaction fires.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a flag or variable in the host store.
///
/// Command payloads may use either a numeric index (`12`) or a name
/// (`"A"`, `"gs1"`); both are kept as given.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateKey {
    /// Numeric slot, as used by engines with indexed switch tables.
    Index(u32),
    /// Named slot.
    Name(String),
}

impl StateKey {
    /// Creates a named key.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl From<u32> for StateKey {
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for StateKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Value written to a host variable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    /// Whole number.
    Integer(i64),
    /// Fractional number.
    Float(f64),
    /// Text.
    Text(String),
}

impl From<i64> for VariableValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}
