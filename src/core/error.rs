use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Malformed source: {0}")]
    MalformedSource(String),

    #[error("Skill database is not loaded yet")]
    NotReady,

    #[error("Skill database is already loaded")]
    AlreadyLoaded,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Background(String),
}

impl From<tokio::task::JoinError> for DbError {
    fn from(e: tokio::task::JoinError) -> Self {
        DbError::Background(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
