//! Per-class skill catalog and the class-independent ignore set

use crate::core::types::{ClassName, DbIdx};
use crate::skills::record::SkillRecord;
use std::collections::{HashMap, HashSet};

/// class -> database index -> skill record
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    classes: HashMap<ClassName, HashMap<DbIdx, SkillRecord>>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class so it resolves even if none of its skills survive filtering
    pub fn add_class(&mut self, class_name: impl Into<ClassName>) {
        self.classes.entry(class_name.into()).or_default();
    }

    /// Insert a record; the first record for a given index wins.
    ///
    /// Returns false when the index was already present for this class.
    pub fn insert(&mut self, class_name: &str, record: SkillRecord) -> bool {
        let skills = self.classes.entry(class_name.to_string()).or_default();
        if skills.contains_key(&record.db_index) {
            return false;
        }
        skills.insert(record.db_index, record);
        true
    }

    pub fn get(&self, class_name: &str, db_index: DbIdx) -> Option<&SkillRecord> {
        self.classes.get(class_name)?.get(&db_index)
    }

    /// All records of one class, if the class is known
    pub fn class(&self, class_name: &str) -> Option<&HashMap<DbIdx, SkillRecord>> {
        self.classes.get(class_name)
    }

    pub fn contains_class(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Known class names, sorted
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over (class, record) pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkillRecord)> {
        self.classes
            .iter()
            .flat_map(|(class, skills)| skills.values().map(move |record| (class.as_str(), record)))
    }

    /// Total records across all classes
    pub fn len(&self) -> usize {
        self.classes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Database indices that never count toward a rotation
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    indices: HashSet<DbIdx>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, db_index: DbIdx) {
        self.indices.insert(db_index);
    }

    pub fn contains(&self, db_index: DbIdx) -> bool {
        self.indices.contains(&db_index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl FromIterator<DbIdx> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = DbIdx>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}
