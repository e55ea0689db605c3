//! Processor orchestration for rulesync.
//!
//! A processor is scoped to one feature and one tool and runs the load,
//! convert and write steps in either direction against an injected
//! [`rulesync_fs::FileSystem`]. [`SyncEngine`] drives every processor a
//! [`SyncConfig`] selects.

pub mod config;
pub mod engine;
pub mod error;
pub mod processor;

pub use config::SyncConfig;
pub use engine::{FeatureReport, SyncEngine, SyncReport};
pub use error::{Error, InvariantError, Result};
pub use processor::{
    CommandsProcessor, FeatureProcessor, IgnoreProcessor, LoadOutcome, McpProcessor,
    RulesProcessor, WriteReport,
};
