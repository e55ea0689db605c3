//! Rule adapters.
//!
//! One [`RuleAdapter`] per tool, looked up with [`rule_adapter`]. Tools with
//! a root file write the root rule there and every other rule into their
//! rules directory; tools without one write every rule into the directory.

mod native;
pub mod references;

use crate::classify::{self, augment, cursor, kiro, windsurf};
use crate::{Error, Result};
use rulesync_fs::{FileSystem, NormalizedPath};
use rulesync_meta::layout::{MARKDOWN_EXT, OVERVIEW_FILE, RULES_DIR};
use rulesync_meta::validation::{ValidationError, ValidationResult};
use rulesync_meta::{
    CursorHints, FileLocation, RuleFrontmatter, RulesyncRule, Targets, ToolTarget,
};

pub use native::NativeRuleMeta;

/// How a tool encodes rule activation in its files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    /// Markdown body only
    Plain,
    /// `.mdc` with `description`, `globs`, `alwaysApply`
    Cursor,
    /// `description`, `applyTo`
    Copilot,
    /// `type`, `description`
    Augment,
    /// `trigger`, `globs`, `description`
    Windsurf,
    /// `inclusion`, `fileMatchPattern`
    Kiro,
}

/// A tool's rule layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleAdapter {
    pub target: ToolTarget,
    /// Root file relative to the base directory.
    pub root_file: Option<&'static str>,
    /// Directory for non-root rules.
    pub dir: &'static str,
    pub extension: &'static str,
    pub format: RuleFormat,
    /// Whether the root file lists the other rules in a reference section.
    pub reference_section: bool,
}

/// A native rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRule {
    pub target: ToolTarget,
    pub location: FileLocation,
    pub root: bool,
    pub meta: NativeRuleMeta,
    pub body: String,
}

const fn memories(
    target: ToolTarget,
    root_file: &'static str,
    dir: &'static str,
) -> RuleAdapter {
    RuleAdapter {
        target,
        root_file: Some(root_file),
        dir,
        extension: ".md",
        format: RuleFormat::Plain,
        reference_section: true,
    }
}

const fn directory(target: ToolTarget, dir: &'static str, format: RuleFormat) -> RuleAdapter {
    RuleAdapter {
        target,
        root_file: None,
        dir,
        extension: ".md",
        format,
        reference_section: false,
    }
}

/// Rule adapter for a tool.
pub fn rule_adapter(target: ToolTarget) -> RuleAdapter {
    use ToolTarget::*;
    match target {
        AgentsMd => memories(target, "AGENTS.md", ".agents/memories"),
        AmazonQCli => directory(target, ".amazonq/rules", RuleFormat::Plain),
        AugmentCode => directory(target, ".augment/rules", RuleFormat::Augment),
        AugmentCodeLegacy => RuleAdapter {
            root_file: Some(".augment-guidelines"),
            ..directory(target, ".augment/rules", RuleFormat::Plain)
        },
        ClaudeCode => memories(target, "CLAUDE.md", ".claude/memories"),
        Cline => directory(target, ".clinerules", RuleFormat::Plain),
        CodexCli => memories(target, "AGENTS.md", ".codex/memories"),
        Copilot => RuleAdapter {
            root_file: Some(".github/copilot-instructions.md"),
            extension: ".instructions.md",
            ..directory(target, ".github/instructions", RuleFormat::Copilot)
        },
        Cursor => RuleAdapter {
            extension: ".mdc",
            ..directory(target, ".cursor/rules", RuleFormat::Cursor)
        },
        GeminiCli => memories(target, "GEMINI.md", ".gemini/memories"),
        Junie => memories(target, ".junie/guidelines.md", ".junie/memories"),
        Kiro => directory(target, ".kiro/steering", RuleFormat::Kiro),
        OpenCode => memories(target, "AGENTS.md", ".opencode/memories"),
        QwenCode => memories(target, "QWEN.md", ".qwen/memories"),
        Roo => directory(target, ".roo/rules", RuleFormat::Plain),
        Windsurf => directory(target, ".windsurf/rules", RuleFormat::Windsurf),
    }
}

impl RuleAdapter {
    pub fn is_root_path(&self, relative_path: &str) -> bool {
        self.root_file
            .is_some_and(|root| NormalizedPath::new(root) == NormalizedPath::new(relative_path))
    }

    /// Native rule files present under `base_dir`, relative to it.
    ///
    /// The root file (if present) comes first, then the rules directory in
    /// name order.
    pub fn native_paths(&self, fs: &dyn FileSystem, base_dir: &NormalizedPath) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        if let Some(root) = self.root_file
            && fs.file_exists(&base_dir.join(root))
        {
            paths.push(root.to_string());
        }
        for name in fs.list_files(&base_dir.join(self.dir))? {
            let relative = format!("{}/{name}", self.dir);
            if name.ends_with(self.extension) && name.len() > self.extension.len() && !self.is_root_path(&relative) {
                paths.push(relative);
            }
        }
        Ok(paths)
    }

    pub fn from_file(
        &self,
        fs: &dyn FileSystem,
        base_dir: &NormalizedPath,
        relative_path: &str,
    ) -> Result<ToolRule> {
        let content = fs.read_file(&base_dir.join(relative_path))?;
        self.from_content(base_dir, relative_path, &content)
    }

    pub fn from_content(
        &self,
        base_dir: &NormalizedPath,
        relative_path: &str,
        content: &str,
    ) -> Result<ToolRule> {
        let location = FileLocation::from_relative(base_dir.clone(), relative_path);
        let root = self.is_root_path(relative_path);

        let (meta, body) = if root {
            (NativeRuleMeta::Plain, content.to_string())
        } else {
            let stem = location.stem(self.extension);
            native::parse(self.format, stem, content)
                .map_err(|message| Error::parse(location.path().to_native(), message))?
        };

        Ok(ToolRule {
            target: self.target,
            location,
            root,
            meta,
            body,
        })
    }

    /// Native rule for one canonical rule.
    ///
    /// Reference sections span several rules; see [`Self::from_canonical_set`].
    pub fn from_canonical(&self, rule: &RulesyncRule, base_dir: &NormalizedPath) -> ToolRule {
        let root = rule.is_root() && self.root_file.is_some();
        let location = match (root, self.root_file) {
            (true, Some(root_file)) => FileLocation::from_relative(base_dir.clone(), root_file),
            _ => FileLocation::new(
                base_dir.clone(),
                self.dir,
                format!("{}{}", rule.stem(), self.extension),
            ),
        };

        let fm = &rule.frontmatter;
        let meta = if root {
            NativeRuleMeta::Plain
        } else {
            match self.format {
                RuleFormat::Plain => NativeRuleMeta::Plain,
                RuleFormat::Cursor => NativeRuleMeta::Cursor(cursor::native_fields(
                    cursor::mode_for(fm),
                    &fm.description,
                    &fm.globs,
                )),
                RuleFormat::Copilot => NativeRuleMeta::Copilot {
                    description: fm.description.clone(),
                    apply_to: fm.globs.clone(),
                },
                RuleFormat::Augment => NativeRuleMeta::Augment {
                    rule_type: augment::from_canonical(fm),
                    description: fm.description.clone(),
                },
                RuleFormat::Windsurf => {
                    let trigger = windsurf::from_canonical(fm);
                    NativeRuleMeta::Windsurf {
                        trigger,
                        globs: match trigger {
                            windsurf::WindsurfTrigger::Glob => fm.globs.clone(),
                            _ => Vec::new(),
                        },
                        description: fm.description.clone(),
                    }
                }
                RuleFormat::Kiro => {
                    let inclusion = kiro::from_canonical(fm);
                    NativeRuleMeta::Kiro {
                        inclusion,
                        file_match_pattern: match inclusion {
                            kiro::KiroInclusion::FileMatch => Some(fm.globs.join(",")),
                            _ => None,
                        },
                    }
                }
            }
        };

        ToolRule {
            target: self.target,
            location,
            root,
            meta,
            body: rule.body.clone(),
        }
    }

    /// Native rules for a whole canonical collection, including the root
    /// file's reference section where the tool uses one.
    pub fn from_canonical_set(&self, rules: &[RulesyncRule], base_dir: &NormalizedPath) -> Vec<ToolRule> {
        let natives: Vec<ToolRule> = rules
            .iter()
            .map(|rule| self.from_canonical(rule, base_dir))
            .collect();
        if self.reference_section {
            references::attach(self, rules, natives, base_dir)
        } else {
            natives
        }
    }

    pub fn to_canonical(&self, native: &ToolRule) -> RulesyncRule {
        let base_dir = native.location.base_dir.clone();

        if native.root {
            let body = if self.reference_section {
                references::strip(&native.body)
            } else {
                native.body.clone()
            };
            let frontmatter = RuleFrontmatter {
                root: true,
                targets: Some(Targets::Wildcard),
                globs: classify::all_files(),
                ..Default::default()
            };
            return RulesyncRule::new_unchecked(
                FileLocation::new(base_dir, RULES_DIR, OVERVIEW_FILE),
                frontmatter,
                body,
            );
        }

        let mut frontmatter = RuleFrontmatter {
            targets: Some(Targets::Wildcard),
            ..Default::default()
        };
        match &native.meta {
            NativeRuleMeta::Plain => {}
            NativeRuleMeta::Cursor(fields) => {
                let mode = cursor::classify(fields);
                frontmatter.description = fields.description.clone();
                frontmatter.globs = match mode {
                    rulesync_meta::CursorRuleType::Always => classify::all_files(),
                    _ => fields.globs.clone(),
                };
                // Hint only where inference would pick a different mode
                if cursor::infer_mode(&frontmatter) != mode {
                    frontmatter.cursor = Some(CursorHints {
                        rule_type: Some(mode),
                    });
                }
            }
            NativeRuleMeta::Copilot {
                description,
                apply_to,
            } => {
                frontmatter.description = description.clone();
                frontmatter.globs = apply_to.clone();
            }
            NativeRuleMeta::Augment {
                rule_type,
                description,
            } => {
                frontmatter.description = description.clone();
                if *rule_type == augment::AugmentRuleType::Always {
                    frontmatter.globs = classify::all_files();
                }
            }
            NativeRuleMeta::Windsurf {
                trigger,
                globs,
                description,
            } => {
                frontmatter.description = description.clone();
                frontmatter.globs = match trigger {
                    windsurf::WindsurfTrigger::AlwaysOn => classify::all_files(),
                    windsurf::WindsurfTrigger::Glob => globs.clone(),
                    _ => Vec::new(),
                };
            }
            NativeRuleMeta::Kiro {
                inclusion,
                file_match_pattern,
            } => {
                frontmatter.globs = match inclusion {
                    kiro::KiroInclusion::Always => classify::all_files(),
                    kiro::KiroInclusion::FileMatch => file_match_pattern
                        .as_deref()
                        .map(rulesync_meta::frontmatter::split_list)
                        .unwrap_or_default(),
                    kiro::KiroInclusion::Manual => Vec::new(),
                };
            }
        }

        let stem = native.location.stem(self.extension);
        RulesyncRule::new_unchecked(
            FileLocation::new(base_dir, RULES_DIR, format!("{stem}{MARKDOWN_EXT}")),
            frontmatter,
            native.body.clone(),
        )
    }

    pub fn validate(&self, native: &ToolRule) -> ValidationResult {
        let globs: &[String] = match &native.meta {
            NativeRuleMeta::Cursor(fields) => fields.globs.as_slice(),
            NativeRuleMeta::Copilot { apply_to, .. } => apply_to.as_slice(),
            NativeRuleMeta::Windsurf { globs, .. } => globs.as_slice(),
            NativeRuleMeta::Kiro {
                inclusion: kiro::KiroInclusion::FileMatch,
                file_match_pattern,
            } if file_match_pattern.as_deref().is_none_or(|p| p.trim().is_empty()) => {
                return Err(ValidationError::new(
                    "fileMatchPattern",
                    "required when inclusion is fileMatch",
                ));
            }
            _ => &[],
        };
        match globs.iter().position(|g| g.trim().is_empty()) {
            Some(idx) => Err(ValidationError::new(format!("globs[{idx}]"), "must not be empty")),
            None => Ok(()),
        }
    }

    /// File content for a native rule.
    pub fn render(&self, native: &ToolRule) -> String {
        native::render(&native.meta, &native.body)
    }
}
