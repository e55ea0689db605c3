//! Error types for rulesync-core

use rulesync_meta::{Feature, ToolTarget};

/// Result type for rulesync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rulesync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tool has no adapter for the feature
    #[error("{target} does not support {feature}")]
    UnsupportedFeature { target: ToolTarget, feature: Feature },

    /// Invalid sync configuration
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// A collection-wide rule was broken; the whole batch is rejected
    #[error(transparent)]
    Invariant(#[from] InvariantError),

    #[error(transparent)]
    Fs(#[from] rulesync_fs::Error),

    #[error(transparent)]
    Meta(#[from] rulesync_meta::Error),

    #[error(transparent)]
    Tools(#[from] rulesync_tools::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Violations that span more than one file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("Multiple root rules: {}", .files.join(", "))]
    MultipleRootRules { files: Vec<String> },

    #[error("Unknown targets in {path}: {}", .ids.join(", "))]
    UnknownTargets { path: String, ids: Vec<String> },
}
