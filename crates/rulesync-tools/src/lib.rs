//! Tool adapters for rulesync.
//!
//! Every supported tool is described by plain lookup tables rather than
//! per-tool types:
//!
//! - [`rules::rule_adapter`], [`ignore::ignore_adapter`],
//!   [`commands::command_adapter`] and [`mcp::mcp_adapter`] return small
//!   `Copy` structs holding a tool's file layout plus a format tag.
//! - [`classify`] holds the ordered heuristics that turn loosely structured
//!   native frontmatter into canonical semantics and back.
//! - [`registry`] answers which tool supports which feature.
//!
//! Each adapter exposes the same contract: `from_content`/`from_file` parse
//! one native file, `from_canonical` builds a native value, `to_canonical`
//! inverts it (lossily where the native format lacks a field), `validate`
//! checks a native value and `render` produces file content.

pub mod classify;
pub mod commands;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod mcp;
pub mod merge;
pub mod registry;
pub mod rules;

pub use commands::{CommandAdapter, CommandFormat, ToolCommand, command_adapter};
pub use error::{Error, Result};
pub use ignore::{IgnoreAdapter, IgnoreFormat, ToolIgnore, ignore_adapter};
pub use mcp::{McpAdapter, ToolMcp, mcp_adapter};
pub use registry::{ToolRegistration, ToolRegistry};
pub use rules::{NativeRuleMeta, RuleAdapter, RuleFormat, ToolRule, rule_adapter};
