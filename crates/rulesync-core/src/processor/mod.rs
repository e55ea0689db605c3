//! Feature processors.
//!
//! One processor per feature, each scoped to a single tool and base
//! directory. Loading is per-file isolated: a file that fails to parse or
//! validate is recorded in [`LoadOutcome::errors`] and skipped, while a
//! collection-wide violation aborts the load with [`crate::InvariantError`].
//! Writes are best-effort and independent, with no rollback.

mod commands;
mod ignore;
mod mcp;
mod rules;

pub use commands::CommandsProcessor;
pub use ignore::IgnoreProcessor;
pub use mcp::McpProcessor;
pub use rules::RulesProcessor;

use crate::{Error, InvariantError, Result};
use rulesync_fs::{FileSystem, NormalizedPath};
use rulesync_meta::{Feature, FileLocation, Targets, ToolTarget};
use rulesync_tools::ToolRegistry;
use std::fmt::Display;

/// Entities that loaded, plus one message per file that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome<T> {
    pub entities: Vec<T>,
    pub errors: Vec<String>,
}

impl<T> Default for LoadOutcome<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> LoadOutcome<T> {
    pub(crate) fn record<E: Display>(&mut self, path: &NormalizedPath, result: std::result::Result<T, E>) {
        match result {
            Ok(entity) => self.entities.push(entity),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Skipping file");
                self.errors.push(e.to_string());
            }
        }
    }
}

/// Paths written (relative to the base directory) and per-file failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<String>,
    pub errors: Vec<String>,
}

impl WriteReport {
    /// Write one rendered file, or record why it could not be rendered or written.
    pub(crate) fn write(&mut self, fs: &dyn FileSystem, location: &FileLocation, content: Result<String>) {
        let path = location.path();
        let result = content.and_then(|content| fs.write_file(&path, &content).map_err(Error::from));
        match result {
            Ok(()) => {
                tracing::debug!(path = %path, "Wrote file");
                self.written.push(location.relative_path());
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to write file");
                self.errors.push(e.to_string());
            }
        }
    }
}

/// The load / convert / write steps for one feature.
pub trait FeatureProcessor {
    /// Canonical entity type.
    type Canonical;
    /// Native entity type.
    type Native;

    const FEATURE: Feature;

    fn target(&self) -> ToolTarget;

    fn load_rulesync_files(&self) -> Result<LoadOutcome<Self::Canonical>>;

    fn load_tool_files(&self) -> Result<LoadOutcome<Self::Native>>;

    /// Native entities for the canonical entities that apply to this tool.
    fn convert_rulesync_to_tool(&self, entities: &[Self::Canonical]) -> Vec<Self::Native>;

    fn convert_tool_to_rulesync(&self, natives: &[Self::Native]) -> Vec<Self::Canonical>;

    fn write_tool_files(&self, natives: &[Self::Native]) -> WriteReport;

    fn write_rulesync_files(&self, entities: &[Self::Canonical]) -> WriteReport;
}

/// Look up a tool's adapter for a feature, checked against the registry.
pub(crate) fn require_adapter<A>(target: ToolTarget, feature: Feature, adapter: Option<A>) -> Result<A> {
    adapter
        .filter(|_| ToolRegistry::with_builtins().supports(target, feature))
        .ok_or(Error::UnsupportedFeature { target, feature })
}

/// Reject explicit target ids that name no known tool.
pub(crate) fn check_targets(path: &FileLocation, targets: Option<&Targets>) -> Result<()> {
    let ids = targets.map(Targets::unknown_ids).unwrap_or_default();
    if ids.is_empty() {
        Ok(())
    } else {
        Err(InvariantError::UnknownTargets {
            path: path.relative_path(),
            ids,
        }
        .into())
    }
}

/// Current content of a file that is about to be merged into.
pub(crate) fn read_existing(fs: &dyn FileSystem, path: &NormalizedPath) -> Result<Option<String>> {
    if fs.file_exists(path) {
        Ok(Some(fs.read_file(path)?))
    } else {
        Ok(None)
    }
}
