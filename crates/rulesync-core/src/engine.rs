//! SyncEngine: runs every selected processor in one direction.
//!
//! - **generate**: canonical → native for each base directory, tool and
//!   feature the configuration selects
//! - **import**: native → canonical for a single tool
//!
//! Pairs the registry does not support are skipped. Per-file failures end
//! up in the returned report; invariant violations abort the run.

use crate::processor::{
    CommandsProcessor, FeatureProcessor, IgnoreProcessor, McpProcessor, RulesProcessor,
};
use crate::{Result, SyncConfig};
use rulesync_fs::{FileSystem, NormalizedPath};
use rulesync_meta::{Feature, ToolTarget};
use rulesync_tools::ToolRegistry;

/// Outcome of one processor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureReport {
    pub target: ToolTarget,
    pub feature: Feature,
    /// Paths written, relative to the base directory.
    pub written: Vec<String>,
    /// Load and write failures, one per file.
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub reports: Vec<FeatureReport>,
}

impl SyncReport {
    /// Whether every run finished without per-file errors.
    pub fn is_clean(&self) -> bool {
        self.reports.iter().all(|r| r.errors.is_empty())
    }

    pub fn written(&self) -> impl Iterator<Item = &str> {
        self.reports
            .iter()
            .flat_map(|r| r.written.iter().map(String::as_str))
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.reports
            .iter()
            .flat_map(|r| r.errors.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Generate,
    Import,
}

pub struct SyncEngine<'a> {
    fs: &'a dyn FileSystem,
    config: SyncConfig,
    registry: ToolRegistry,
}

impl<'a> SyncEngine<'a> {
    pub fn new(fs: &'a dyn FileSystem, config: SyncConfig) -> Self {
        Self {
            fs,
            config,
            registry: ToolRegistry::with_builtins(),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Write native files for every configured tool from the canonical files.
    pub fn generate(&self) -> Result<SyncReport> {
        let targets = self.config.resolved_targets()?;
        let features = self.config.resolved_features()?;
        tracing::info!(targets = targets.len(), features = features.len(), "Generating tool files");

        let mut report = SyncReport::default();
        for base_dir in &self.config.base_dirs {
            let base_dir = NormalizedPath::new(base_dir);
            for &target in &targets {
                for &feature in &features {
                    if let Some(run) = self.run(&base_dir, target, feature, Direction::Generate)? {
                        report.reports.push(run);
                    }
                }
            }
        }
        Ok(report)
    }

    /// Write canonical files from one tool's native files.
    pub fn import(&self, target: ToolTarget) -> Result<SyncReport> {
        let features = self.config.resolved_features()?;
        tracing::info!(tool = %target, "Importing tool files");

        let mut report = SyncReport::default();
        for base_dir in &self.config.base_dirs {
            let base_dir = NormalizedPath::new(base_dir);
            for &feature in &features {
                if let Some(run) = self.run(&base_dir, target, feature, Direction::Import)? {
                    report.reports.push(run);
                }
            }
        }
        Ok(report)
    }

    fn run(
        &self,
        base_dir: &NormalizedPath,
        target: ToolTarget,
        feature: Feature,
        direction: Direction,
    ) -> Result<Option<FeatureReport>> {
        if !self.registry.supports(target, feature) {
            tracing::debug!(tool = %target, feature = %feature, "Skipping unsupported feature");
            return Ok(None);
        }

        let fs = self.fs;
        let base = base_dir.clone();
        let report = match feature {
            Feature::Rules => run_processor(&RulesProcessor::new(fs, base, target)?, direction)?,
            Feature::Ignore => run_processor(&IgnoreProcessor::new(fs, base, target)?, direction)?,
            Feature::Commands => run_processor(&CommandsProcessor::new(fs, base, target)?, direction)?,
            Feature::Mcp => run_processor(&McpProcessor::new(fs, base, target)?, direction)?,
        };
        Ok(Some(report))
    }
}

fn run_processor<P: FeatureProcessor>(processor: &P, direction: Direction) -> Result<FeatureReport> {
    let (written, errors) = match direction {
        Direction::Generate => {
            let loaded = processor.load_rulesync_files()?;
            let natives = processor.convert_rulesync_to_tool(&loaded.entities);
            let write = processor.write_tool_files(&natives);
            (write.written, [loaded.errors, write.errors].concat())
        }
        Direction::Import => {
            let loaded = processor.load_tool_files()?;
            let entities = processor.convert_tool_to_rulesync(&loaded.entities);
            let write = processor.write_rulesync_files(&entities);
            (write.written, [loaded.errors, write.errors].concat())
        }
    };

    tracing::info!(
        tool = %processor.target(),
        feature = %P::FEATURE,
        written = written.len(),
        errors = errors.len(),
        "Processed feature"
    );
    Ok(FeatureReport {
        target: processor.target(),
        feature: P::FEATURE,
        written,
        errors,
    })
}
