//! Identifier reconciliation index
//!
//! Maps a class and a game index to every database index that the game
//! action may appear as. One game action can stand for several database
//! entries (upgraded versions of a skill, for instance), so each slot holds
//! a list.

use crate::core::types::{ClassName, DbIdx, GameIdx};
use std::collections::HashMap;

/// One row of the adjustment table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentEntry {
    pub class_name: ClassName,
    /// Human-readable label from the table; informational only
    pub action_name: String,
    pub game_index: GameIdx,
    pub db_index: DbIdx,
}

impl AdjustmentEntry {
    pub fn new(
        class_name: impl Into<ClassName>,
        action_name: impl Into<String>,
        game_index: GameIdx,
        db_index: DbIdx,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            action_name: action_name.into(),
            game_index,
            db_index,
        }
    }
}

/// class -> game index -> database indices, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    classes: HashMap<ClassName, HashMap<GameIdx, Vec<DbIdx>>>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one mapping. Exact duplicates are kept as duplicate entries.
    pub fn insert(&mut self, entry: &AdjustmentEntry) {
        self.classes
            .entry(entry.class_name.clone())
            .or_default()
            .entry(entry.game_index)
            .or_default()
            .push(entry.db_index);
    }

    /// Append every entry of `rows`
    pub fn insert_rows<'a>(&mut self, rows: impl IntoIterator<Item = &'a AdjustmentEntry>) {
        for entry in rows {
            self.insert(entry);
        }
    }

    /// True if `db_index` is recorded for `class_name` / `game_index`
    pub fn contains(&self, class_name: &str, game_index: GameIdx, db_index: DbIdx) -> bool {
        self.db_indices(class_name, game_index).contains(&db_index)
    }

    /// Database indices recorded for `class_name` / `game_index`
    pub fn db_indices(&self, class_name: &str, game_index: GameIdx) -> &[DbIdx] {
        self.classes
            .get(class_name)
            .and_then(|by_game| by_game.get(&game_index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of classes with at least one mapping
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Total number of stored mappings, duplicates included
    pub fn len(&self) -> usize {
        self.classes
            .values()
            .flat_map(|by_game| by_game.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
