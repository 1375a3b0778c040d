//! Shape of the remote skill database document
//!
//! Only the fields the catalog needs are typed. Everything else rides along
//! as raw JSON so one odd upstream record never fails the whole document.

use crate::core::error::{DbError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Top-level document: `skills`, `classes` and `misc` are all required
#[derive(Debug, Deserialize)]
pub struct SkillDocument {
    /// Skill objects keyed by stringified database index
    pub skills: HashMap<String, Value>,
    /// Class objects keyed by class name
    pub classes: Map<String, Value>,
    /// Database indices excluded from rotations (potions, items, ...)
    pub misc: Vec<Value>,
}

impl SkillDocument {
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| DbError::MalformedSource(format!("skill database: {}", e)))
    }
}

/// Combat role tag of a class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discipline {
    /// Melee/physical jobs
    War,
    /// Caster jobs
    Magic,
}

impl Discipline {
    /// Crafting and gathering tags are not combat disciplines and map to `None`
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "war" => Some(Discipline::War),
            "magic" => Some(Discipline::Magic),
            _ => None,
        }
    }
}

/// A class object: its discipline plus any number of index lists
#[derive(Debug, Deserialize)]
pub struct ClassEntry {
    #[serde(default)]
    pub discipline: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ClassEntry {
    pub fn discipline(&self) -> Option<Discipline> {
        self.discipline.as_deref().and_then(Discipline::from_tag)
    }

    /// Property name and elements of every array-valued property
    pub fn index_lists(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.properties
            .iter()
            .filter_map(|(key, value)| value.as_array().map(|list| (key.as_str(), list.as_slice())))
    }
}

/// A skill object: a name, an optional deprecation marker, everything else opaque
#[derive(Debug, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    #[serde(default)]
    pub deprecated: Option<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl SkillEntry {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.as_ref().is_some_and(is_truthy)
    }
}

/// Loose truthiness of the upstream `deprecated` marker.
///
/// `null`, `false`, `0`, `""` and `"0"` are falsy; anything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0")
        }
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_document() {
        let doc = SkillDocument::parse(
            r#"{"skills": {"501": {"name": "Heavy Swing"}},
                "classes": {"Warrior": {"discipline": "war", "combo": [501]}},
                "misc": [777]}"#,
        )
        .unwrap();

        assert_eq!(doc.skills.len(), 1);
        assert!(doc.classes.contains_key("Warrior"));
        assert_eq!(doc.misc, vec![json!(777)]);
    }

    #[test]
    fn test_missing_top_level_key_is_malformed() {
        let result = SkillDocument::parse(r#"{"skills": {}, "classes": {}}"#);
        match result {
            Err(DbError::MalformedSource(msg)) => assert!(msg.contains("misc"), "{}", msg),
            other => panic!("expected MalformedSource, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(
            SkillDocument::parse("<html>moved</html>"),
            Err(DbError::MalformedSource(_))
        ));
    }

    #[test]
    fn test_discipline_tags() {
        assert_eq!(Discipline::from_tag("war"), Some(Discipline::War));
        assert_eq!(Discipline::from_tag("magic"), Some(Discipline::Magic));
        assert_eq!(Discipline::from_tag("hand"), None);
        assert_eq!(Discipline::from_tag("land"), None);
        assert_eq!(Discipline::from_tag("War"), None);
    }

    #[test]
    fn test_class_entry_index_lists() {
        let entry: ClassEntry = serde_json::from_value(json!({
            "discipline": "war",
            "name": "Warrior",
            "level": 90,
            "combo": [1, 2],
            "ogcd": [3]
        }))
        .unwrap();

        assert_eq!(entry.discipline(), Some(Discipline::War));
        let lists: Vec<_> = entry.index_lists().collect();
        assert_eq!(lists.len(), 2);
        assert!(lists.iter().any(|(key, list)| *key == "ogcd" && list.len() == 1));
    }

    #[test]
    fn test_skill_entry_deprecation() {
        let live: SkillEntry = serde_json::from_value(json!({"name": "A"})).unwrap();
        assert!(!live.is_deprecated());

        let zero: SkillEntry =
            serde_json::from_value(json!({"name": "B", "deprecated": "0"})).unwrap();
        assert!(!zero.is_deprecated());

        let gone: SkillEntry =
            serde_json::from_value(json!({"name": "C", "deprecated": "1"})).unwrap();
        assert!(gone.is_deprecated());

        let kept_attrs: SkillEntry =
            serde_json::from_value(json!({"name": "D", "icon": "d.png", "recast": 60})).unwrap();
        assert_eq!(kept_attrs.attributes.get("recast"), Some(&json!(60)));
        assert!(!kept_attrs.attributes.contains_key("name"));
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(""), json!("0"), json!(" ")] {
            assert!(!is_truthy(&falsy), "{:?} should be falsy", falsy);
        }
        for truthy in [json!(true), json!(1), json!("1"), json!("yes"), json!([0])] {
            assert!(is_truthy(&truthy), "{:?} should be truthy", truthy);
        }
    }
}
