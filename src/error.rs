use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("not found")]
    NotFound,

    #[error("a project named '{0}' already exists")]
    DuplicateName(String),

    #[error("token hash collision")]
    DuplicateHash,

    #[error("does not exist or is not a directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("file exists already: {}", .0.display())]
    DatabaseExists(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("command timed out after {}s", .0.as_secs())]
    CommandTimedOut(Duration),
}

pub type Result<T> = std::result::Result<T, Error>;
