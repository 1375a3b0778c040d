//! Query facade over the loaded tables

pub mod rotation;
pub mod skill_db;

pub use rotation::RotationData;
pub use skill_db::SkillDatabase;
