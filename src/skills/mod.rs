//! Skill catalog built from the community skill database

pub mod catalog;
pub mod record;
pub mod source;
mod loader;

pub use catalog::{IgnoreSet, SkillCatalog};
pub use loader::{build_skill_index, fetch_database_url, load_skill_index};
pub use record::SkillRecord;
pub use source::{Discipline, SkillDocument};
