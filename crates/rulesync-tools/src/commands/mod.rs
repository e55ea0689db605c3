//! Slash-command adapters.
//!
//! Markdown tools keep a command per file with optional frontmatter; Gemini
//! CLI uses a TOML file with `description` and `prompt` and spells the
//! argument placeholder `{{args}}` instead of `$ARGUMENTS`.

use crate::{Error, Result};
use rulesync_fs::{FileSystem, NormalizedPath};
use rulesync_meta::frontmatter;
use rulesync_meta::layout::{COMMANDS_DIR, MARKDOWN_EXT};
use rulesync_meta::validation::{ValidationError, ValidationResult};
use rulesync_meta::{CommandFrontmatter, FileLocation, RulesyncCommand, Targets, ToolTarget};
use serde::{Deserialize, Serialize};

const CANONICAL_ARGS: &str = "$ARGUMENTS";
const GEMINI_ARGS: &str = "{{args}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFormat {
    /// Markdown body only
    Plain,
    /// `description`, `argument-hint`
    Claude,
    /// `mode: agent`, `description`
    Copilot,
    /// TOML `description`, `prompt`
    Gemini,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandAdapter {
    pub target: ToolTarget,
    pub dir: &'static str,
    pub extension: &'static str,
    pub format: CommandFormat,
}

/// A native command file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub target: ToolTarget,
    pub location: FileLocation,
    pub description: String,
    pub argument_hint: Option<String>,
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    prompt: String,
}

/// Command adapter for a tool; `None` when the tool has no commands.
pub fn command_adapter(target: ToolTarget) -> Option<CommandAdapter> {
    use ToolTarget::*;
    let (dir, extension, format) = match target {
        ClaudeCode => (".claude/commands", ".md", CommandFormat::Claude),
        CodexCli => (".codex/prompts", ".md", CommandFormat::Plain),
        Copilot => (".github/prompts", ".prompt.md", CommandFormat::Copilot),
        Cursor => (".cursor/commands", ".md", CommandFormat::Plain),
        GeminiCli => (".gemini/commands", ".toml", CommandFormat::Gemini),
        Roo => (".roo/commands", ".md", CommandFormat::Claude),
        _ => return None,
    };
    Some(CommandAdapter {
        target,
        dir,
        extension,
        format,
    })
}

impl CommandAdapter {
    pub fn native_paths(&self, fs: &dyn FileSystem, base_dir: &NormalizedPath) -> Result<Vec<String>> {
        Ok(fs
            .list_files(&base_dir.join(self.dir))?
            .into_iter()
            .filter(|name| name.ends_with(self.extension) && name.len() > self.extension.len())
            .map(|name| format!("{}/{name}", self.dir))
            .collect())
    }

    pub fn from_file(
        &self,
        fs: &dyn FileSystem,
        base_dir: &NormalizedPath,
        relative_path: &str,
    ) -> Result<ToolCommand> {
        let content = fs.read_file(&base_dir.join(relative_path))?;
        self.from_content(base_dir, relative_path, &content)
    }

    pub fn from_content(
        &self,
        base_dir: &NormalizedPath,
        relative_path: &str,
        content: &str,
    ) -> Result<ToolCommand> {
        let location = FileLocation::from_relative(base_dir.clone(), relative_path);
        let mut command = ToolCommand {
            target: self.target,
            location,
            description: String::new(),
            argument_hint: None,
            body: String::new(),
        };

        match self.format {
            CommandFormat::Plain => {
                // Frontmatter, if any, carries nothing we keep.
                command.body = frontmatter::split(content).1.to_string();
            }
            CommandFormat::Claude | CommandFormat::Copilot => {
                let (raw, body) = frontmatter::split(content);
                let pairs = raw.map(frontmatter::parse_pairs).unwrap_or_default();
                command.description = frontmatter::pair(&pairs, "description")
                    .unwrap_or_default()
                    .to_string();
                if self.format == CommandFormat::Claude {
                    command.argument_hint =
                        frontmatter::pair(&pairs, "argument-hint").map(str::to_string);
                }
                command.body = body.to_string();
            }
            CommandFormat::Gemini => {
                let parsed: GeminiCommand = toml::from_str(content)
                    .map_err(|e| Error::parse(command.location.path().to_native(), e))?;
                command.description = parsed.description.unwrap_or_default();
                command.body = parsed.prompt;
            }
        }
        Ok(command)
    }

    pub fn from_canonical(&self, command: &RulesyncCommand, base_dir: &NormalizedPath) -> ToolCommand {
        let body = match self.format {
            CommandFormat::Gemini => command.body.replace(CANONICAL_ARGS, GEMINI_ARGS),
            _ => command.body.clone(),
        };
        ToolCommand {
            target: self.target,
            location: FileLocation::new(
                base_dir.clone(),
                self.dir,
                format!("{}{}", command.stem(), self.extension),
            ),
            description: command.frontmatter.description.clone(),
            argument_hint: None,
            body,
        }
    }

    /// Canonical command; `argument-hint` has no canonical field and is dropped.
    pub fn to_canonical(&self, native: &ToolCommand) -> RulesyncCommand {
        let body = match self.format {
            CommandFormat::Gemini => native.body.replace(GEMINI_ARGS, CANONICAL_ARGS),
            _ => native.body.clone(),
        };
        let stem = native.location.stem(self.extension);
        RulesyncCommand::new_unchecked(
            FileLocation::new(
                native.location.base_dir.clone(),
                COMMANDS_DIR,
                format!("{stem}{MARKDOWN_EXT}"),
            ),
            CommandFrontmatter {
                description: native.description.clone(),
                targets: Some(Targets::Wildcard),
            },
            body,
        )
    }

    pub fn validate(&self, native: &ToolCommand) -> ValidationResult {
        if native.location.stem(self.extension) == native.location.file_name {
            return Err(ValidationError::new(
                "fileName",
                format!("must end with '{}'", self.extension),
            ));
        }
        if self.format == CommandFormat::Gemini && native.body.trim().is_empty() {
            return Err(ValidationError::new("prompt", "must not be empty"));
        }
        if native.description.contains('\n') {
            return Err(ValidationError::new("description", "must be a single line"));
        }
        Ok(())
    }

    pub fn render(&self, native: &ToolCommand) -> Result<String> {
        match self.format {
            CommandFormat::Plain => Ok(frontmatter::render_pairs(&[], &native.body)),
            CommandFormat::Claude => {
                let mut pairs = Vec::new();
                if !native.description.is_empty() {
                    pairs.push(("description", native.description.clone()));
                }
                if let Some(hint) = &native.argument_hint {
                    pairs.push(("argument-hint", hint.clone()));
                }
                Ok(frontmatter::render_pairs(&pairs, &native.body))
            }
            CommandFormat::Copilot => Ok(frontmatter::render_pairs(
                &[
                    ("mode", "agent".to_string()),
                    ("description", native.description.clone()),
                ],
                &native.body,
            )),
            CommandFormat::Gemini => {
                let file = GeminiCommand {
                    description: Some(native.description.clone()).filter(|d| !d.is_empty()),
                    prompt: native.body.clone(),
                };
                toml::to_string(&file)
                    .map_err(|e| Error::serialize(native.location.path().to_native(), e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn base() -> NormalizedPath {
        NormalizedPath::new("/repo")
    }

    fn canonical(body: &str) -> RulesyncCommand {
        RulesyncCommand::new_unchecked(
            FileLocation::new(base(), COMMANDS_DIR, "review.md"),
            CommandFrontmatter {
                description: "Review the diff".into(),
                targets: Some(Targets::Wildcard),
            },
            body,
        )
    }

    #[rstest]
    #[case(ToolTarget::ClaudeCode, ".claude/commands/review.md")]
    #[case(ToolTarget::CodexCli, ".codex/prompts/review.md")]
    #[case(ToolTarget::Copilot, ".github/prompts/review.prompt.md")]
    #[case(ToolTarget::Cursor, ".cursor/commands/review.md")]
    #[case(ToolTarget::GeminiCli, ".gemini/commands/review.toml")]
    #[case(ToolTarget::Roo, ".roo/commands/review.md")]
    fn test_output_paths(#[case] target: ToolTarget, #[case] expected: &str) {
        let adapter = command_adapter(target).unwrap();
        let native = adapter.from_canonical(&canonical("x\n"), &base());
        assert_eq!(native.location.relative_path(), expected);
    }

    #[test]
    fn test_claude_render_and_parse() {
        let adapter = command_adapter(ToolTarget::ClaudeCode).unwrap();
        let content = "---\ndescription: Review the diff\nargument-hint: [file]\n---\n\nReview $ARGUMENTS\n";
        let native = adapter
            .from_content(&base(), ".claude/commands/review.md", content)
            .unwrap();

        assert_eq!(native.description, "Review the diff");
        assert_eq!(native.argument_hint.as_deref(), Some("[file]"));
        assert_eq!(native.body, "Review $ARGUMENTS\n");

        let back = adapter.to_canonical(&native);
        assert_eq!(back.location.relative_path(), ".rulesync/commands/review.md");
        assert_eq!(back.frontmatter.description, "Review the diff");
        assert_eq!(back.frontmatter.targets, Some(Targets::Wildcard));
    }

    #[test]
    fn test_gemini_placeholder_translation() {
        let adapter = command_adapter(ToolTarget::GeminiCli).unwrap();
        let native = adapter.from_canonical(&canonical("Review $ARGUMENTS now\n"), &base());
        assert_eq!(native.body, "Review {{args}} now\n");

        let rendered = adapter.render(&native).unwrap();
        let reparsed = adapter
            .from_content(&base(), ".gemini/commands/review.toml", &rendered)
            .unwrap();
        assert_eq!(reparsed.description, "Review the diff");

        let back = adapter.to_canonical(&reparsed);
        assert_eq!(back.body, "Review $ARGUMENTS now\n");
    }

    #[test]
    fn test_gemini_malformed_toml() {
        let adapter = command_adapter(ToolTarget::GeminiCli).unwrap();
        let err = adapter
            .from_content(&base(), ".gemini/commands/x.toml", "description = \"no prompt\"\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_copilot_mode_is_dropped_on_import() {
        let adapter = command_adapter(ToolTarget::Copilot).unwrap();
        let native = adapter.from_canonical(&canonical("Body\n"), &base());
        let rendered = adapter.render(&native).unwrap();
        assert!(rendered.starts_with("---\nmode: agent\ndescription: Review the diff\n---\n"));

        let reparsed = adapter
            .from_content(&base(), ".github/prompts/review.prompt.md", &rendered)
            .unwrap();
        let back = adapter.to_canonical(&reparsed);
        assert_eq!(back.stem(), "review");
        assert_eq!(back.body, "Body\n");
    }

    #[test]
    fn test_plain_tools_lose_description() {
        let adapter = command_adapter(ToolTarget::Cursor).unwrap();
        let native = adapter.from_canonical(&canonical("Body\n"), &base());
        assert_eq!(adapter.render(&native).unwrap(), "Body\n");

        let reparsed = adapter
            .from_content(&base(), ".cursor/commands/review.md", "Body\n")
            .unwrap();
        assert_eq!(adapter.to_canonical(&reparsed).frontmatter.description, "");
    }

    #[rstest]
    #[case(ToolTarget::ClaudeCode, ".claude/commands/review.md")]
    #[case(ToolTarget::Cursor, ".cursor/commands/review.md")]
    fn test_body_starting_with_rule_line_is_kept(#[case] target: ToolTarget, #[case] path: &str) {
        let adapter = command_adapter(target).unwrap();
        let body = "---\nIntro\n---\nRest\n";
        let mut native = adapter.from_canonical(&canonical(body), &base());
        native.description.clear();

        let rendered = adapter.render(&native).unwrap();
        let reparsed = adapter.from_content(&base(), path, &rendered).unwrap();

        assert_eq!(reparsed.body, body);
    }

    #[test]
    fn test_tools_without_commands() {
        for target in [ToolTarget::Cline, ToolTarget::Kiro, ToolTarget::Windsurf] {
            assert!(command_adapter(target).is_none());
        }
    }
}
