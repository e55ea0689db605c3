//! Rules: `.rulesync/rules/*.md` ⇄ a tool's root file and rules directory.

use super::{FeatureProcessor, LoadOutcome, WriteReport, check_targets, require_adapter};
use crate::{InvariantError, Result};
use rulesync_fs::{FileSystem, NormalizedPath};
use rulesync_meta::layout::{MARKDOWN_EXT, RULES_DIR};
use rulesync_meta::{Feature, FileLocation, RulesyncRule, ToolTarget, applies_to};
use rulesync_tools::{RuleAdapter, ToolRule, rule_adapter};

pub struct RulesProcessor<'a> {
    fs: &'a dyn FileSystem,
    base_dir: NormalizedPath,
    adapter: RuleAdapter,
}

impl<'a> RulesProcessor<'a> {
    pub fn new(fs: &'a dyn FileSystem, base_dir: impl Into<NormalizedPath>, target: ToolTarget) -> Result<Self> {
        Ok(Self {
            fs,
            base_dir: base_dir.into(),
            adapter: require_adapter(target, Feature::Rules, Some(rule_adapter(target)))?,
        })
    }
}

impl FeatureProcessor for RulesProcessor<'_> {
    type Canonical = RulesyncRule;
    type Native = ToolRule;

    const FEATURE: Feature = Feature::Rules;

    fn target(&self) -> ToolTarget {
        self.adapter.target
    }

    fn load_rulesync_files(&self) -> Result<LoadOutcome<RulesyncRule>> {
        let mut outcome = LoadOutcome::default();
        let dir = self.base_dir.join(RULES_DIR);
        for name in self.fs.list_files(&dir)? {
            if !name.ends_with(MARKDOWN_EXT) {
                continue;
            }
            let location = FileLocation::new(self.base_dir.clone(), RULES_DIR, name);
            let path = location.path();
            let result = self
                .fs
                .read_file(&path)
                .map_err(rulesync_meta::Error::from)
                .and_then(|content| RulesyncRule::from_content(location, &content));
            outcome.record(&path, result);
        }

        let roots: Vec<String> = outcome
            .entities
            .iter()
            .filter(|rule| rule.is_root())
            .map(|rule| rule.location.relative_path())
            .collect();
        if roots.len() > 1 {
            return Err(InvariantError::MultipleRootRules { files: roots }.into());
        }
        for rule in &outcome.entities {
            check_targets(&rule.location, rule.frontmatter.targets.as_ref())?;
        }

        tracing::debug!(count = outcome.entities.len(), errors = outcome.errors.len(), "Loaded rulesync rules");
        Ok(outcome)
    }

    fn load_tool_files(&self) -> Result<LoadOutcome<ToolRule>> {
        let mut outcome = LoadOutcome::default();
        for relative in self.adapter.native_paths(self.fs, &self.base_dir)? {
            let path = self.base_dir.join(&relative);
            let result = self
                .adapter
                .from_file(self.fs, &self.base_dir, &relative)
                .map_err(|e| e.to_string())
                .and_then(|rule| {
                    self.adapter
                        .validate(&rule)
                        .map(|()| rule)
                        .map_err(|e| format!("Invalid {path}: {e}"))
                });
            outcome.record(&path, result);
        }
        tracing::debug!(tool = %self.adapter.target, count = outcome.entities.len(), "Loaded tool rules");
        Ok(outcome)
    }

    fn convert_rulesync_to_tool(&self, entities: &[RulesyncRule]) -> Vec<ToolRule> {
        let selected: Vec<RulesyncRule> = entities
            .iter()
            .filter(|rule| applies_to(rule.frontmatter.targets.as_ref(), self.adapter.target))
            .cloned()
            .collect();
        self.adapter.from_canonical_set(&selected, &self.base_dir)
    }

    fn convert_tool_to_rulesync(&self, natives: &[ToolRule]) -> Vec<RulesyncRule> {
        natives.iter().map(|native| self.adapter.to_canonical(native)).collect()
    }

    fn write_tool_files(&self, natives: &[ToolRule]) -> WriteReport {
        let mut report = WriteReport::default();
        for native in natives {
            report.write(self.fs, &native.location, Ok(self.adapter.render(native)));
        }
        report
    }

    fn write_rulesync_files(&self, entities: &[RulesyncRule]) -> WriteReport {
        let mut report = WriteReport::default();
        for rule in entities {
            report.write(self.fs, &rule.location, rule.to_file_content().map_err(Into::into));
        }
        report
    }
}
