//! Load the adjustment table from CSV
//!
//! The table is a trusted local file, so any row that cannot be parsed fails
//! the whole load: a partially built table would silently misclassify
//! actions.

use crate::adjust::table::{ActionTable, AdjustmentEntry};
use crate::core::error::{DbError, Result};
use crate::core::types::{DbIdx, GameIdx};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ActionTableRow {
    #[serde(rename = "ClassName")]
    class_name: String,
    #[serde(rename = "ActionName")]
    action_name: String,
    #[serde(rename = "GameIdx")]
    game_idx: u32,
    #[serde(rename = "DBIdx")]
    db_idx: u32,
}

impl From<ActionTableRow> for AdjustmentEntry {
    fn from(row: ActionTableRow) -> Self {
        AdjustmentEntry::new(
            row.class_name,
            row.action_name,
            GameIdx(row.game_idx),
            DbIdx(row.db_idx),
        )
    }
}

/// Parse CSV content with a `ClassName,ActionName,GameIdx,DBIdx` header
pub fn parse_adjustments(content: &str) -> Result<Vec<AdjustmentEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();
    for record in reader.deserialize::<ActionTableRow>() {
        let row = record.map_err(|e| {
            let line = e
                .position()
                .map(|p| p.line().to_string())
                .unwrap_or_else(|| "?".into());
            DbError::MalformedSource(format!("action table line {}: {}", line, e))
        })?;
        entries.push(row.into());
    }

    Ok(entries)
}

/// Parse CSV content straight into a reconciliation index
pub fn parse_action_table(content: &str) -> Result<ActionTable> {
    let entries = parse_adjustments(content)?;
    let mut table = ActionTable::new();
    table.insert_rows(&entries);
    Ok(table)
}

/// Read the adjustment table at `path`, parsing it on the blocking pool
pub async fn load_action_table(path: &Path) -> Result<ActionTable> {
    let content = tokio::fs::read_to_string(path).await?;
    let table = tokio::task::spawn_blocking(move || parse_action_table(&content)).await??;

    tracing::info!(
        "Loaded action table from {}: {} mappings across {} classes",
        path.display(),
        table.len(),
        table.class_count()
    );
    Ok(table)
}
