//! Adjustment table: reconciles game indices with database indices

pub mod table;
mod loader;

pub use loader::{load_action_table, parse_action_table, parse_adjustments};
pub use table::{ActionTable, AdjustmentEntry};
