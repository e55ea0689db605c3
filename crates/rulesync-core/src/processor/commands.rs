//! Commands: `.rulesync/commands/*.md` ⇄ a tool's command directory.

use super::{FeatureProcessor, LoadOutcome, WriteReport, check_targets, require_adapter};
use crate::Result;
use rulesync_fs::{FileSystem, NormalizedPath};
use rulesync_meta::layout::{COMMANDS_DIR, MARKDOWN_EXT};
use rulesync_meta::{Feature, FileLocation, RulesyncCommand, ToolTarget, applies_to};
use rulesync_tools::{CommandAdapter, ToolCommand, command_adapter};

pub struct CommandsProcessor<'a> {
    fs: &'a dyn FileSystem,
    base_dir: NormalizedPath,
    adapter: CommandAdapter,
}

impl<'a> CommandsProcessor<'a> {
    pub fn new(fs: &'a dyn FileSystem, base_dir: impl Into<NormalizedPath>, target: ToolTarget) -> Result<Self> {
        Ok(Self {
            fs,
            base_dir: base_dir.into(),
            adapter: require_adapter(target, Feature::Commands, command_adapter(target))?,
        })
    }
}

impl FeatureProcessor for CommandsProcessor<'_> {
    type Canonical = RulesyncCommand;
    type Native = ToolCommand;

    const FEATURE: Feature = Feature::Commands;

    fn target(&self) -> ToolTarget {
        self.adapter.target
    }

    fn load_rulesync_files(&self) -> Result<LoadOutcome<RulesyncCommand>> {
        let mut outcome = LoadOutcome::default();
        for name in self.fs.list_files(&self.base_dir.join(COMMANDS_DIR))? {
            if !name.ends_with(MARKDOWN_EXT) {
                continue;
            }
            let location = FileLocation::new(self.base_dir.clone(), COMMANDS_DIR, name);
            let path = location.path();
            let result = self
                .fs
                .read_file(&path)
                .map_err(rulesync_meta::Error::from)
                .and_then(|content| RulesyncCommand::from_content(location, &content));
            outcome.record(&path, result);
        }
        for command in &outcome.entities {
            check_targets(&command.location, command.frontmatter.targets.as_ref())?;
        }
        Ok(outcome)
    }

    fn load_tool_files(&self) -> Result<LoadOutcome<ToolCommand>> {
        let mut outcome = LoadOutcome::default();
        for relative in self.adapter.native_paths(self.fs, &self.base_dir)? {
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

    fn convert_rulesync_to_tool(&self, entities: &[RulesyncCommand]) -> Vec<ToolCommand> {
        entities
            .iter()
            .filter(|command| applies_to(command.frontmatter.targets.as_ref(), self.adapter.target))
            .map(|command| self.adapter.from_canonical(command, &self.base_dir))
            .collect()
    }

    fn convert_tool_to_rulesync(&self, natives: &[ToolCommand]) -> Vec<RulesyncCommand> {
        natives.iter().map(|native| self.adapter.to_canonical(native)).collect()
    }

    fn write_tool_files(&self, natives: &[ToolCommand]) -> WriteReport {
        let mut report = WriteReport::default();
        for native in natives {
            report.write(self.fs, &native.location, self.adapter.render(native).map_err(Into::into));
        }
        report
    }

    fn write_rulesync_files(&self, entities: &[RulesyncCommand]) -> WriteReport {
        let mut report = WriteReport::default();
        for command in entities {
            report.write(self.fs, &command.location, command.to_file_content().map_err(Into::into));
        }
        report
    }
}
