//! Ignore: `.rulesyncignore` ⇄ a tool's ignore file or deny list.

use super::{FeatureProcessor, LoadOutcome, WriteReport, read_existing, require_adapter};
use crate::Result;
use rulesync_fs::{FileSystem, NormalizedPath};
use rulesync_meta::layout::IGNORE_FILE;
use rulesync_meta::{Feature, FileLocation, RulesyncIgnore, ToolTarget};
use rulesync_tools::{IgnoreAdapter, ToolIgnore, ignore_adapter};

pub struct IgnoreProcessor<'a> {
    fs: &'a dyn FileSystem,
    base_dir: NormalizedPath,
    adapter: IgnoreAdapter,
}

impl<'a> IgnoreProcessor<'a> {
    pub fn new(fs: &'a dyn FileSystem, base_dir: impl Into<NormalizedPath>, target: ToolTarget) -> Result<Self> {
        Ok(Self {
            fs,
            base_dir: base_dir.into(),
            adapter: require_adapter(target, Feature::Ignore, ignore_adapter(target))?,
        })
    }
}

impl FeatureProcessor for IgnoreProcessor<'_> {
    type Canonical = RulesyncIgnore;
    type Native = ToolIgnore;

    const FEATURE: Feature = Feature::Ignore;

    fn target(&self) -> ToolTarget {
        self.adapter.target
    }

    fn load_rulesync_files(&self) -> Result<LoadOutcome<RulesyncIgnore>> {
        let mut outcome = LoadOutcome::default();
        let location = FileLocation::new(self.base_dir.clone(), "", IGNORE_FILE);
        let path = location.path();
        if self.fs.file_exists(&path) {
            let result = self
                .fs
                .read_file(&path)
                .map_err(rulesync_meta::Error::from)
                .and_then(|content| RulesyncIgnore::from_content(location, &content));
            outcome.record(&path, result);
        }
        Ok(outcome)
    }

    fn load_tool_files(&self) -> Result<LoadOutcome<ToolIgnore>> {
        let mut outcome = LoadOutcome::default();
        for relative in self.adapter.native_paths(self.fs, &self.base_dir) {
            let path = self.base_dir.join(&relative);
            let result = self
                .adapter
                .from_file(self.fs, &self.base_dir, &relative)
                .map_err(|e| e.to_string())
                .and_then(|native| {
                    self.adapter
                        .validate(&native)
                        .map(|()| native)
                        .map_err(|e| format!("Invalid {path}: {e}"))
                });
            outcome.record(&path, result);
        }
        Ok(outcome)
    }

    fn convert_rulesync_to_tool(&self, entities: &[RulesyncIgnore]) -> Vec<ToolIgnore> {
        entities
            .iter()
            .map(|ignore| self.adapter.from_canonical(ignore, &self.base_dir))
            .collect()
    }

    fn convert_tool_to_rulesync(&self, natives: &[ToolIgnore]) -> Vec<RulesyncIgnore> {
        natives.iter().map(|native| self.adapter.to_canonical(native)).collect()
    }

    fn write_tool_files(&self, natives: &[ToolIgnore]) -> WriteReport {
        let mut report = WriteReport::default();
        for native in natives {
            let content = if self.adapter.is_merged() {
                read_existing(self.fs, &native.location.path())
                    .and_then(|existing| Ok(self.adapter.render(native, existing.as_deref())?))
            } else {
                self.adapter.render(native, None).map_err(Into::into)
            };
            report.write(self.fs, &native.location, content);
        }
        report
    }

    fn write_rulesync_files(&self, entities: &[RulesyncIgnore]) -> WriteReport {
        let mut report = WriteReport::default();
        for ignore in entities {
            report.write(self.fs, &ignore.location, Ok(ignore.to_file_content()));
        }
        report
    }
}
