//! Rotation DB - skill reference database for rotation tracking

pub mod adjust;
pub mod core;
pub mod database;
pub mod fetch;
pub mod skills;

pub use crate::core::{DbConfig, DbError, DbIdx, GameIdx, Result};
pub use database::{RotationData, SkillDatabase};
