//! Rotations handed in by the tracking layer

use crate::core::types::{ClassName, DbIdx};
use serde::{Deserialize, Serialize};

/// An observed or authored rotation: a class and a sequence of database indices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationData {
    #[serde(rename = "class", default)]
    pub class_name: Option<ClassName>,
    #[serde(default)]
    pub sequence: Vec<DbIdx>,
}

impl RotationData {
    pub fn new(class_name: impl Into<ClassName>, sequence: Vec<DbIdx>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_rotation() {
        let rotation: RotationData =
            serde_json::from_str(r#"{"class": "Warrior", "sequence": [501, 777]}"#).unwrap();
        assert_eq!(rotation, RotationData::new("Warrior", vec![DbIdx(501), DbIdx(777)]));
    }

    #[test]
    fn test_missing_fields_default() {
        let rotation: RotationData = serde_json::from_str("{}").unwrap();
        assert!(rotation.class_name.is_none());
        assert!(rotation.sequence.is_empty());
    }
}
