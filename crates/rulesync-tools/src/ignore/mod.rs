//! Ignore adapters.
//!
//! Most tools read a gitignore-style file. Claude Code instead denies file
//! access through `permissions.deny` in `.claude/settings.json`, mapped by
//! [`crate::classify::permissions`].

use crate::classify::permissions;
use crate::{Error, Result, merge};
use rulesync_fs::{FileSystem, NormalizedPath};
use rulesync_meta::layout::IGNORE_FILE;
use rulesync_meta::schema::ignore::parse_lines;
use rulesync_meta::validation::{ValidationError, ValidationResult};
use rulesync_meta::{FileLocation, RulesyncIgnore, ToolTarget};
use serde_json::Value;

/// Shape of a tool's ignore file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreFormat {
    Gitignore,
    /// `permissions.deny` list merged into a JSON settings file
    ClaudePermissions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreAdapter {
    pub target: ToolTarget,
    /// File relative to the base directory.
    pub file: &'static str,
    pub format: IgnoreFormat,
}

/// A native ignore file.
///
/// `entries` are gitignore patterns or permission strings, per format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolIgnore {
    pub target: ToolTarget,
    pub location: FileLocation,
    pub entries: Vec<String>,
}

const DENY_PATH: &[&str] = &["permissions", "deny"];

/// Ignore adapter for a tool; `None` when the tool has no ignore file.
pub fn ignore_adapter(target: ToolTarget) -> Option<IgnoreAdapter> {
    use ToolTarget::*;
    let (file, format) = match target {
        AugmentCode => (".augmentignore", IgnoreFormat::Gitignore),
        ClaudeCode => (".claude/settings.json", IgnoreFormat::ClaudePermissions),
        Cline => (".clineignore", IgnoreFormat::Gitignore),
        CodexCli => (".codexignore", IgnoreFormat::Gitignore),
        Cursor => (".cursorignore", IgnoreFormat::Gitignore),
        GeminiCli | QwenCode => (".geminiignore", IgnoreFormat::Gitignore),
        Junie | Kiro => (".aiignore", IgnoreFormat::Gitignore),
        Roo => (".rooignore", IgnoreFormat::Gitignore),
        Windsurf => (".codeiumignore", IgnoreFormat::Gitignore),
        AgentsMd | AmazonQCli | AugmentCodeLegacy | Copilot | OpenCode => return None,
    };
    Some(IgnoreAdapter {
        target,
        file,
        format,
    })
}

impl IgnoreAdapter {
    /// Whether writing replaces only a key of an existing file.
    pub fn is_merged(&self) -> bool {
        self.format == IgnoreFormat::ClaudePermissions
    }

    pub fn native_paths(&self, fs: &dyn FileSystem, base_dir: &NormalizedPath) -> Vec<String> {
        if fs.file_exists(&base_dir.join(self.file)) {
            vec![self.file.to_string()]
        } else {
            Vec::new()
        }
    }

    pub fn from_file(
        &self,
        fs: &dyn FileSystem,
        base_dir: &NormalizedPath,
        relative_path: &str,
    ) -> Result<ToolIgnore> {
        let content = fs.read_file(&base_dir.join(relative_path))?;
        self.from_content(base_dir, relative_path, &content)
    }

    pub fn from_content(
        &self,
        base_dir: &NormalizedPath,
        relative_path: &str,
        content: &str,
    ) -> Result<ToolIgnore> {
        let location = FileLocation::from_relative(base_dir.clone(), relative_path);
        let entries = match self.format {
            IgnoreFormat::Gitignore => parse_lines(content).0,
            IgnoreFormat::ClaudePermissions => parse_deny(content)
                .map_err(|message| Error::parse(location.path().to_native(), message))?,
        };
        Ok(ToolIgnore {
            target: self.target,
            location,
            entries,
        })
    }

    pub fn from_canonical(&self, ignore: &RulesyncIgnore, base_dir: &NormalizedPath) -> ToolIgnore {
        let entries = match self.format {
            IgnoreFormat::Gitignore => ignore.patterns.clone(),
            IgnoreFormat::ClaudePermissions => permissions::to_deny(&ignore.patterns),
        };
        ToolIgnore {
            target: self.target,
            location: FileLocation::from_relative(base_dir.clone(), self.file),
            entries,
        }
    }

    pub fn to_canonical(&self, native: &ToolIgnore) -> RulesyncIgnore {
        let (patterns, notes) = match self.format {
            IgnoreFormat::Gitignore => (native.entries.clone(), Vec::new()),
            IgnoreFormat::ClaudePermissions => permissions::to_ignore(&native.entries),
        };
        RulesyncIgnore {
            location: FileLocation::new(native.location.base_dir.clone(), "", IGNORE_FILE),
            patterns,
            notes,
        }
    }

    pub fn validate(&self, native: &ToolIgnore) -> ValidationResult {
        for (idx, entry) in native.entries.iter().enumerate() {
            if entry.trim().is_empty() || entry.contains('\n') {
                return Err(ValidationError::new(
                    format!("entries[{idx}]"),
                    "must be a non-empty single line",
                ));
            }
        }
        Ok(())
    }

    /// File content; `existing` is the current file for merged formats.
    pub fn render(&self, native: &ToolIgnore, existing: Option<&str>) -> Result<String> {
        match self.format {
            IgnoreFormat::Gitignore => Ok(native
                .entries
                .iter()
                .map(|entry| format!("{entry}\n"))
                .collect()),
            IgnoreFormat::ClaudePermissions => {
                let path = native.location.path().to_native();
                let merged = merge::merge_json(existing, DENY_PATH, Value::from(native.entries.clone()))
                    .map_err(|message| Error::parse(&path, message))?;
                merge::to_json_string(&merged).map_err(|message| Error::serialize(path, message))
            }
        }
    }
}

fn parse_deny(content: &str) -> std::result::Result<Vec<String>, String> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;
    match value.pointer("/permissions/deny") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| "permissions.deny must contain only strings".to_string())
            })
            .collect(),
        Some(_) => Err("permissions.deny must be an array".to_string()),
    }
}
