//! Skill records as catalogued by the community database

use crate::core::types::DbIdx;
use serde::Serialize;
use serde_json::{Map, Value};

/// One game action as known to the external database
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRecord {
    pub db_index: DbIdx,
    pub name: String,
    /// Every other field of the source object (icon, cooldown, description, ...)
    pub attributes: Map<String, Value>,
}

impl SkillRecord {
    pub fn new(db_index: DbIdx, name: impl Into<String>) -> Self {
        Self {
            db_index,
            name: name.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Icon reference, when the source provides one as text
    pub fn icon(&self) -> Option<&str> {
        self.attributes.get("icon").and_then(Value::as_str)
    }

    /// Raw descriptive field by name
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Name folded for lookups: spaces removed, lowercased
    pub(crate) fn folded_name(&self) -> String {
        fold_name(&self.name)
    }
}

pub(crate) fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}
