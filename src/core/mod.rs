pub mod config;
pub mod error;
pub mod types;

pub use config::DbConfig;
pub use error::{DbError, Result};
pub use types::{ClassName, DbIdx, GameIdx};
