//! Canonical on-disk layout

/// Root of all canonical files.
pub const RULESYNC_DIR: &str = ".rulesync";

/// Canonical rules: one markdown file with YAML frontmatter per rule.
pub const RULES_DIR: &str = ".rulesync/rules";

/// Canonical slash-commands, same shape as rules.
pub const COMMANDS_DIR: &str = ".rulesync/commands";

/// Canonical ignore file, gitignore syntax.
pub const IGNORE_FILE: &str = ".rulesyncignore";

/// Canonical MCP server set, `{"mcpServers": {...}}`.
pub const MCP_FILE: &str = ".rulesync/.mcp.json";

/// Extension of canonical rule and command files.
pub const MARKDOWN_EXT: &str = ".md";

/// File name given to a rule imported from a tool's root file.
pub const OVERVIEW_FILE: &str = "overview.md";
