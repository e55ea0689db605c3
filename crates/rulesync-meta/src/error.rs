//! Error types for rulesync-meta

use crate::ValidationError;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] rulesync_fs::Error),

    /// Malformed frontmatter, JSON or TOML in a single file.
    #[error("Failed to parse {format} in {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Invalid {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("Failed to serialize {format}: {message}")]
    Serialize {
        format: &'static str,
        message: String,
    },
}

impl Error {
    pub fn parse(path: impl Into<PathBuf>, format: &'static str, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            format,
            message: message.to_string(),
        }
    }

    pub fn invalid(path: impl Into<PathBuf>, source: ValidationError) -> Self {
        Self::Invalid {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialize {
            format: "yaml",
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize {
            format: "json",
            message: e.to_string(),
        }
    }
}
