//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Job/class name as it appears in the skill database and the adjustment table
pub type ClassName = String;

/// Action identifier as observed by the game client at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameIdx(pub u32);

impl GameIdx {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for GameIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Action identifier as catalogued by the community skill database
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DbIdx(pub u32);

impl DbIdx {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Interpret a loosely-typed JSON value as a database index.
    ///
    /// Accepts non-negative integers that fit in `u32`; everything else
    /// (floats, strings, negatives) yields `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Self)
    }

    /// Key used by the `skills` map of the source document
    pub fn source_key(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for DbIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
