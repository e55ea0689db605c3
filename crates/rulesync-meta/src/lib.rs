//! Canonical model for rulesync.
//!
//! Holds the vendor-neutral entities every tool conversion passes through
//! (rules, ignore patterns, commands, MCP servers), their schema validation,
//! the YAML frontmatter codec, and the canonical on-disk layout.

pub mod error;
pub mod frontmatter;
pub mod layout;
pub mod location;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use location::FileLocation;
pub use schema::{
    CommandFrontmatter, CursorHints, CursorRuleType, Feature, McpServer, McpServerEntry,
    McpTransport, McpTransportConfig, ParseIdError, RuleFrontmatter, RulesyncCommand,
    RulesyncIgnore, RulesyncMcp, RulesyncRule, Targets, ToolTarget, applies_to,
};
pub use validation::{ValidationError, ValidationResult};
