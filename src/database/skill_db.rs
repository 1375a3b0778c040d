//! The loaded skill database and its query surface
//!
//! A `SkillDatabase` starts empty. `load` builds every table off to the
//! side and publishes them together as one snapshot, so a query either sees
//! nothing (and answers empty/false) or sees fully built tables. Publishing
//! happens at most once.

use crate::adjust::{load_action_table, ActionTable};
use crate::core::config::DbConfig;
use crate::core::error::{DbError, Result};
use crate::core::types::{DbIdx, GameIdx};
use crate::database::rotation::RotationData;
use crate::fetch::SourceFetcher;
use crate::skills::record::fold_name;
use crate::skills::{load_skill_index, IgnoreSet, SkillCatalog, SkillRecord};
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;

struct Snapshot {
    actions: ActionTable,
    catalog: SkillCatalog,
    ignore: IgnoreSet,
}

/// Reference database of skills, queried by the rotation tracker
#[derive(Default)]
pub struct SkillDatabase {
    snapshot: OnceLock<Snapshot>,
}

impl SkillDatabase {
    /// An empty database; every query answers empty/false until loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// A ready database from already built tables
    pub fn from_parts(actions: ActionTable, catalog: SkillCatalog, ignore: IgnoreSet) -> Self {
        let db = Self::new();
        let _ = db.snapshot.set(Snapshot {
            actions,
            catalog,
            ignore,
        });
        db
    }

    /// Load the adjustment table and the remote skill database, then publish.
    ///
    /// The two loads run concurrently; the first failure aborts the load and
    /// nothing is published.
    pub async fn load(&self, fetcher: &dyn SourceFetcher, config: &DbConfig) -> Result<()> {
        if self.is_ready() {
            return Err(DbError::AlreadyLoaded);
        }

        let (actions, (catalog, ignore)) = tokio::try_join!(
            load_action_table(&config.action_table_path),
            load_skill_index(fetcher, config),
        )?;

        self.snapshot
            .set(Snapshot {
                actions,
                catalog,
                ignore,
            })
            .map_err(|_| DbError::AlreadyLoaded)?;

        tracing::info!("Skill database ready");
        Ok(())
    }

    /// Run `load` as a background task
    pub fn spawn_load(
        self: Arc<Self>,
        fetcher: Arc<dyn SourceFetcher>,
        config: DbConfig,
    ) -> JoinHandle<Result<()>> {
        tokio::spawn(async move {
            let result = self.load(fetcher.as_ref(), &config).await;
            if let Err(e) = &result {
                tracing::error!("Skill database load failed: {}", e);
            }
            result
        })
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot.get().is_some()
    }

    /// Strict readiness check for callers that want an error instead of empty answers
    pub fn ensure_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(DbError::NotReady)
        }
    }

    /// Resolve a rotation into skill records, in sequence order.
    ///
    /// Indices the class's catalog does not know are dropped. An unset or
    /// unknown class, an empty sequence, or an unloaded database give an
    /// empty result.
    pub fn get(&self, rotation: &RotationData) -> Vec<&SkillRecord> {
        let Some(snapshot) = self.snapshot.get() else {
            return Vec::new();
        };
        let Some(skills) = rotation
            .class_name
            .as_deref()
            .and_then(|class_name| snapshot.catalog.class(class_name))
        else {
            return Vec::new();
        };

        rotation
            .sequence
            .iter()
            .filter_map(|db_index| skills.get(db_index))
            .collect()
    }

    /// Whether the game index and the database index name the same action for `class_name`
    pub fn is_same_action(&self, class_name: &str, game_index: GameIdx, db_index: DbIdx) -> bool {
        self.snapshot
            .get()
            .is_some_and(|s| s.actions.contains(class_name, game_index, db_index))
    }

    /// Whether `db_index` is excluded from rotations
    pub fn is_ignored(&self, db_index: DbIdx) -> bool {
        self.snapshot
            .get()
            .is_some_and(|s| s.ignore.contains(db_index))
    }

    /// Diagnostic lookup by name across every class.
    ///
    /// Exact match after removing spaces and lowercasing; ordered by class
    /// then index.
    pub fn find(&self, action_name: &str) -> Vec<&SkillRecord> {
        let Some(snapshot) = self.snapshot.get() else {
            return Vec::new();
        };

        let wanted = fold_name(action_name);
        let mut hits: Vec<(&str, &SkillRecord)> = snapshot
            .catalog
            .iter()
            .filter(|(_, record)| record.folded_name() == wanted)
            .collect();
        hits.sort_by(|a, b| (a.0, a.1.db_index).cmp(&(b.0, b.1.db_index)));
        hits.into_iter().map(|(_, record)| record).collect()
    }

    /// Known class names, sorted
    pub fn class_names(&self) -> Vec<&str> {
        self.snapshot
            .get()
            .map(|s| s.catalog.class_names())
            .unwrap_or_default()
    }

    /// Number of skill records across all classes
    pub fn skill_count(&self) -> usize {
        self.snapshot.get().map_or(0, |s| s.catalog.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjust::AdjustmentEntry;
    use proptest::prelude::*;

    fn warrior_db() -> SkillDatabase {
        let mut actions = ActionTable::new();
        actions.insert(&AdjustmentEntry::new(
            "Warrior",
            "Skull Sunder",
            GameIdx(12),
            DbIdx(501),
        ));

        let mut catalog = SkillCatalog::new();
        catalog.insert("Warrior", SkillRecord::new(DbIdx(501), "Heavy Swing"));
        catalog.insert("Warrior", SkillRecord::new(DbIdx(502), "Maim"));
        catalog.insert("Paladin", SkillRecord::new(DbIdx(9), "Heavy  swing"));

        let ignore: IgnoreSet = [DbIdx(777)].into_iter().collect();
        SkillDatabase::from_parts(actions, catalog, ignore)
    }

    #[test]
    fn test_unloaded_answers_empty() {
        let db = SkillDatabase::new();

        assert!(!db.is_ready());
        assert!(matches!(db.ensure_ready(), Err(DbError::NotReady)));
        assert!(db.get(&RotationData::new("Warrior", vec![DbIdx(501)])).is_empty());
        assert!(!db.is_same_action("Warrior", GameIdx(12), DbIdx(501)));
        assert!(!db.is_ignored(DbIdx(777)));
        assert!(db.find("Heavy Swing").is_empty());
        assert_eq!(db.skill_count(), 0);
    }

    #[test]
    fn test_get_drops_unmatched_in_order() {
        let db = warrior_db();
        let rotation = RotationData::new("Warrior", vec![DbIdx(502), DbIdx(777), DbIdx(501), DbIdx(999)]);

        let names: Vec<&str> = db.get(&rotation).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Maim", "Heavy Swing"]);
    }

    #[test]
    fn test_get_unknown_or_unset_class() {
        let db = warrior_db();

        assert!(db.get(&RotationData::new("Bard", vec![DbIdx(501)])).is_empty());
        assert!(db
            .get(&RotationData {
                class_name: None,
                sequence: vec![DbIdx(501)],
            })
            .is_empty());
        assert!(db.get(&RotationData::new("Warrior", vec![])).is_empty());
    }

    #[test]
    fn test_same_action_and_ignore() {
        let db = warrior_db();

        assert!(db.is_same_action("Warrior", GameIdx(12), DbIdx(501)));
        assert!(!db.is_same_action("Warrior", GameIdx(12), DbIdx(999)));
        assert!(!db.is_same_action("Paladin", GameIdx(12), DbIdx(501)));
        assert!(db.is_ignored(DbIdx(777)));
        assert!(!db.is_ignored(DbIdx(501)));
    }

    #[test]
    fn test_find_folds_spaces_and_case() {
        let db = warrior_db();

        let hits = db.find("heavyswing");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].db_index, DbIdx(9));
        assert_eq!(hits[1].db_index, DbIdx(501));
        assert!(db.find("Heavy").is_empty());
    }

    #[test]
    fn test_summary_accessors() {
        let db = warrior_db();
        assert!(db.ensure_ready().is_ok());
        assert_eq!(db.class_names(), vec!["Paladin", "Warrior"]);
        assert_eq!(db.skill_count(), 3);
    }

    proptest! {
        #[test]
        fn prop_get_is_ordered_known_subset(sequence in prop::collection::vec(0u32..12, 0..32)) {
            let mut catalog = SkillCatalog::new();
            for idx in (0u32..12).step_by(3) {
                catalog.insert("Warrior", SkillRecord::new(DbIdx(idx), format!("skill {}", idx)));
            }
            let db = SkillDatabase::from_parts(ActionTable::new(), catalog, IgnoreSet::new());

            let rotation = RotationData::new(
                "Warrior",
                sequence.iter().copied().map(DbIdx).collect(),
            );
            let resolved: Vec<DbIdx> = db.get(&rotation).iter().map(|r| r.db_index).collect();
            let expected: Vec<DbIdx> = sequence
                .iter()
                .copied()
                .filter(|idx| idx % 3 == 0)
                .map(DbIdx)
                .collect();

            prop_assert_eq!(resolved, expected);
        }
    }
}
