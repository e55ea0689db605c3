//! Error types for rulesync-tools

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] rulesync_fs::Error),

    #[error(transparent)]
    Meta(#[from] rulesync_meta::Error),

    /// A native file could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize {path}: {message}")]
    Serialize { path: PathBuf, message: String },
}

impl Error {
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn serialize(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Serialize {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
