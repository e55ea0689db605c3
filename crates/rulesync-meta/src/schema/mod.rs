//! Canonical entity schemas
//!
//! - `.rulesync/rules/*.md` - [`RulesyncRule`]
//! - `.rulesyncignore` - [`RulesyncIgnore`]
//! - `.rulesync/commands/*.md` - [`RulesyncCommand`]
//! - `.rulesync/.mcp.json` - [`RulesyncMcp`]

pub mod command;
pub mod ignore;
pub mod mcp;
pub mod rule;
pub mod target;

pub use command::{CommandFrontmatter, RulesyncCommand};
pub use ignore::RulesyncIgnore;
pub use mcp::{McpServer, McpServerEntry, McpTransport, McpTransportConfig, RulesyncMcp};
pub use rule::{CursorHints, CursorRuleType, RuleFrontmatter, RulesyncRule};
pub use target::{Feature, ParseIdError, Targets, ToolTarget, applies_to};
